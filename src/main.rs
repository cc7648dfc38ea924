use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use fresnel::settings::{self, CliArgs, Command, Settings};
use fresnel::{output, sweep, timing, validation};
use fresnel::{diattenuation, retardance, snell_angle, Amplitudes, Complex64, Powers};


fn main() -> ExitCode {
    let args = CliArgs::parse();
    init_logger(args.verbose);

    match run(&args) {
        Ok(code) => code,
        Err(err) => {
            log::error!("{:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn init_logger(verbosity: u8) {
    let level = match verbosity {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

fn run(args: &CliArgs) -> Result<ExitCode> {
    let settings = settings::load_config(args)?;
    log::info!("{}", settings);

    match &args.command {
        Command::Eval => evaluate(&settings),
        Command::Sweep { .. } => {
            let curve = sweep::sweep(&settings.interface(), settings.quantity, settings.num_angles);
            let path = output::write_curve(&curve, settings.format, &settings.directory)?;
            println!("{}", path.display());
        }
        Command::Test { strict } => {
            let report = validation::run();
            println!("{}", report);
            if *strict && !report.all_passed() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Bench { .. } => {
            let stats = timing::run_rounds(
                settings.trials,
                settings.rounds,
                settings.seed,
                settings.parallel,
            );
            for round in stats {
                println!("{}", round);
            }
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn evaluate(settings: &Settings) {
    let (n_inc, n_sub, theta) = (settings.n_inc, settings.n_sub, settings.theta);
    let ampl = Amplitudes::new(n_inc, n_sub, theta);
    let powers = Powers::from_amplitudes(&ampl, n_inc, n_sub, theta);
    let theta_sub = snell_angle(n_inc, n_sub, theta);

    println!("{}, theta_inc = {:.6}", settings.interface(), theta);
    println!("Transmission angle: {}", complex(theta_sub));
    println!("Amplitude:");
    println!("  rs:               {}", complex(ampl.rs));
    println!("  rp:               {}", complex(ampl.rp));
    println!("  ts:               {}", complex(ampl.ts));
    println!("  tp:               {}", complex(ampl.tp));
    print!("{}", powers);
    println!("Polarization:");
    println!("  Diattenuation (r): {:.6}", diattenuation(powers.rs, powers.rp));
    println!("  Diattenuation (t): {:.6}", diattenuation(powers.ts, powers.tp));
    println!("  Retardance (r):    {:.6}", retardance(ampl.rs, ampl.rp));
    println!("  Retardance (t):    {:.6}", retardance(ampl.ts, ampl.tp));
}

fn complex(z: Complex64) -> String {
    let sign = if z.im < 0.0 { '-' } else { '+' };
    format!("{:.6} {} {:.6}i", z.re, sign, z.im.abs())
}
