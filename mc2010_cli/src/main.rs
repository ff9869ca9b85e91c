//! # MC2010 Torsion CLI
//!
//! Terminal front-end for the Model Code 2010 torsion and shear checks.
//!
//! ```text
//! mc2010 template > beam.json
//! mc2010 check --input beam.json
//! mc2010 shear-flow --t-ed 5e6 --a-k 80000 --z-i 300
//! ```
//!
//! Set `RUST_LOG=debug` to see intermediate factors.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use mc2010_core::calculations::torsion::{calculate, TorsionInput, TorsionResult};
use mc2010_core::equations::{generate_equations_markdown, t_rd_max, v_ed_ti, Mc2010Shear, ShearModel};
use mc2010_core::file_io::{load_input, to_json_pretty};
use mc2010_core::ApproximationLevel;

#[derive(Parser)]
#[command(name = "mc2010")]
#[command(about = "Torsion and shear checks per fib Model Code 2010")]
struct Cli {
    /// Override the concrete safety factor γ_c of the input
    #[arg(long, global = true)]
    gamma_c: Option<f64>,

    /// Override the approximation level (1, 2 or 3)
    #[arg(long, global = true)]
    level: Option<u8>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the combined torsion and shear check on a JSON member input
    Check {
        #[arg(long)]
        input: PathBuf,
        /// Print the result as JSON only
        #[arg(long)]
        json: bool,
    },
    /// Print T_Rd,max and V_Rd,max for a JSON member input
    Capacity {
        #[arg(long)]
        input: PathBuf,
    },
    /// Shear force in one wall due to torsion, V_Ed,i = T_Ed z_i / (2 A_k)
    ShearFlow {
        /// Torsional moment (Nmm)
        #[arg(long)]
        t_ed: f64,
        /// Enclosed area (mm²)
        #[arg(long)]
        a_k: f64,
        /// Wall length (mm)
        #[arg(long)]
        z_i: f64,
    },
    /// Print an example member input
    Template,
    /// Print the equations reference as markdown
    Equations,
    /// Prompt for actions on the example member and check it
    Interactive,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_target(false)
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()) {
        eprintln!("Error: {:#}", e);
        if let Some(calc_err) = e.downcast_ref::<mc2010_core::CalcError>() {
            if let Ok(json) = serde_json::to_string_pretty(calc_err) {
                eprintln!();
                eprintln!("Error JSON:");
                eprintln!("{}", json);
            }
        }
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let overrides = Overrides {
        gamma_c: cli.gamma_c,
        level: cli.level.map(ApproximationLevel::try_from).transpose()?,
    };

    match cli.command {
        Command::Check { input, json } => {
            let member = overrides.apply(
                load_input(&input).with_context(|| format!("loading {}", input.display()))?,
            );
            let result = calculate(&member)?;
            if json {
                println!("{}", to_json_pretty(&result)?);
            } else {
                print_report(&member, &result);
            }
        }
        Command::Capacity { input } => {
            let member = overrides.apply(load_input(&input)?);
            member.validate()?;
            let params = member.interaction_params();
            let t_max = t_rd_max(&Mc2010Shear, &params.torsion_capacity())?;
            let v_max = Mc2010Shear.v_rd_max(&params.shear_capacity())?;
            println!("{} ({})", member.label, params.approx_level);
            println!("  T_Rd,max = {:.0} Nmm ({:.2} kNm)", t_max, t_max / 1e6);
            println!("  V_Rd,max = {:.0} N ({:.1} kN)", v_max, v_max / 1e3);
        }
        Command::ShearFlow { t_ed, a_k, z_i } => {
            tracing::info!(t_ed, a_k, z_i, "shear flow");
            println!("V_Ed,i = {:.1} N", v_ed_ti(t_ed, a_k, z_i));
        }
        Command::Template => {
            println!("{}", to_json_pretty(&overrides.apply(TorsionInput::example()))?);
        }
        Command::Equations => {
            print!("{}", generate_equations_markdown());
        }
        Command::Interactive => interactive(&overrides)?,
    }
    Ok(())
}

/// Settings given on the command line, applied on top of the input file
struct Overrides {
    gamma_c: Option<f64>,
    level: Option<ApproximationLevel>,
}

impl Overrides {
    fn apply(&self, mut input: TorsionInput) -> TorsionInput {
        if let Some(gamma_c) = self.gamma_c {
            input.settings.gamma_c = gamma_c;
        }
        if let Some(level) = self.level {
            input.approx_level = Some(level);
        }
        input
    }
}

fn prompt_f64(prompt: &str, default: f64) -> f64 {
    print!("{}", prompt);
    if io::stdout().flush().is_err() {
        return default;
    }

    let mut input = String::new();
    if io::stdin().lock().read_line(&mut input).is_err() {
        return default;
    }

    input.trim().parse().unwrap_or(default)
}

fn interactive(overrides: &Overrides) -> Result<()> {
    println!("MC2010 Torsion Check");
    println!("====================");
    println!();
    println!("Section: example edge beam (d_k = 400 mm, A_k = 80000 mm², b_w = 300 mm)");
    println!();

    let mut member = overrides.apply(TorsionInput::example());
    member.actions.t_ed_nmm = prompt_f64("Enter torsion T_Ed (kNm) [5.0]: ", 5.0) * 1e6;
    member.actions.v_ed_n = prompt_f64("Enter shear V_Ed (kN) [80.0]: ", 80.0) * 1e3;
    member.actions.m_ed_nmm = prompt_f64("Enter moment M_Ed (kNm) [60.0]: ", 60.0) * 1e6;
    member.theta.0 = prompt_f64("Enter strut angle θ (deg) [40.0]: ", 40.0);
    println!();

    let result = calculate(&member)?;
    print_report(&member, &result);
    Ok(())
}

fn print_report(input: &TorsionInput, result: &TorsionResult) {
    println!("═══════════════════════════════════════");
    println!("  TORSION CHECK: {}", result.label);
    println!("═══════════════════════════════════════");
    println!();
    println!("Input:");
    println!("  T_Ed  = {:.2} kNm", input.actions.t_ed_nmm / 1e6);
    println!("  V_Ed  = {:.1} kN", input.actions.v_ed_n / 1e3);
    println!("  f_ck  = {:.0} MPa, γ_c = {:.2}", input.concrete.f_ck_mpa, input.settings.gamma_c);
    println!("  θ = {}, α = {}, {}", input.theta, input.alfa, result.approx_level);
    println!();
    println!("Section:");
    println!("  t_ef  = {:.1} mm", result.t_ef_mm);
    println!("  ε_x   = {:.3e}", result.epsilon_x);
    for (i, v) in result.wall_shear_forces_n.iter().enumerate() {
        println!("  V_Ed,{} = {:.1} kN", i + 1, v / 1e3);
    }
    println!();
    println!("Capacity Checks:");
    println!(
        "  Torsion:     {:.2} ({:.2}/{:.2} kNm) {}",
        result.torsion_ratio,
        input.actions.t_ed_nmm / 1e6,
        result.t_rd_max_nmm / 1e6,
        status_icon(result.torsion_ratio <= 1.0)
    );
    println!(
        "  Shear:       {:.2} ({:.1}/{:.1} kN) {}",
        result.shear_ratio,
        input.actions.v_ed_n / 1e3,
        result.v_rd_max_n / 1e3,
        status_icon(result.shear_ratio <= 1.0)
    );
    println!(
        "  Interaction: {:.2} {}",
        result.interaction_ratio,
        status_icon(result.passes())
    );
    println!();
    println!("References:");
    for citation in result.equations.citations() {
        println!("  - {}", citation);
    }
    println!();
    println!("═══════════════════════════════════════");
    println!(
        "  RESULT: {} (governs: {})",
        if result.passes() { "PASS" } else { "FAIL" },
        result.governing_condition()
    );
    println!("═══════════════════════════════════════");
}

fn status_icon(pass: bool) -> &'static str {
    if pass { "[OK]" } else { "[FAIL]" }
}
