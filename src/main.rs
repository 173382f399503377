//! vgacam - VGA camera sensor configuration tool
//!
//! Drives a register-configured VGA CMOS image sensor: power sequencing,
//! initialization, control values and the data-line test pattern.
//!
//! # Architecture
//!
//! The core library is backend-agnostic. The register bus (I2C) and the
//! power-control lines (GPIO/regulators) are trait objects selected on the
//! command line, so the same commands run against real hardware or against
//! the in-memory dummy backends.

mod backends;
mod cli;

use clap::Parser;
use cli::{Cli, Commands};
use std::path::Path;
use vgacam_core::camera::Camera;
use vgacam_core::tuning::TuningTable;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logger
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    // Set log level based on verbosity
    match cli.verbose {
        0 => {} // default (info)
        1 => log::set_max_level(log::LevelFilter::Debug),
        _ => log::set_max_level(log::LevelFilter::Trace),
    }

    match cli.command {
        Commands::ListBackends => {
            print!("{}", backends::backend_help());
            Ok(())
        }
        command => run(&cli.bus, &cli.power, cli.table.as_deref(), command),
    }
}

/// Open the backends and execute one camera command
fn run(
    bus_spec: &str,
    power_spec: &str,
    table: Option<&Path>,
    command: Commands,
) -> Result<(), Box<dyn std::error::Error>> {
    let bus = backends::open_bus(bus_spec)?;
    let power = backends::open_power(power_spec)?;

    let mut camera = Camera::new(bus, power);
    if let Some(path) = table {
        let path = path.to_path_buf();
        camera = camera.with_table_loader(Box::new(move || match TuningTable::load(&path) {
            Ok(table) => Some(table),
            Err(e) => {
                log::warn!("tuning table {} not loaded: {}", path.display(), e);
                None
            }
        }));
    }

    match command {
        Commands::PowerOn => {
            camera.power_on()?;
            log::info!("sensor powered on");
        }
        Commands::PowerOff => {
            camera.power_off()?;
            log::info!("sensor powered off");
        }
        Commands::Init => {
            camera.power_on()?;
            camera.init()?;
            log::info!("sensor initialized ({:?} mode)", camera.mode());
        }
        Commands::Reset => {
            camera.reset()?;
            log::info!("sensor reset complete");
        }
        Commands::Preview => {
            camera.power_on()?;
            camera.init()?;
            camera.start_preview()?;
            log::info!("preview started");
        }
        Commands::Set { control, value } => {
            camera.power_on()?;
            camera.init()?;
            camera.set_control_raw(control.kind(), value)?;
            log::info!("applied {:?} = {}", control, value);
        }
        Commands::Status => {
            camera.power_on()?;
            camera.init()?;
            print_status(&camera);
        }
        Commands::ListBackends => unreachable!("handled before backend setup"),
    }

    Ok(())
}

fn print_status<B, P>(camera: &Camera<B, P>)
where
    B: vgacam_core::bus::RegisterBus,
    P: vgacam_core::power::PowerBackend,
{
    let state = camera.state();
    let size = camera.frame_size();

    println!("Sensor Status");
    println!("=============");
    println!();
    println!("Power state:     {:?}", camera.power_state());
    println!("Dispatch mode:   {:?}", camera.mode());
    println!("Bus fault:       {}", camera.bus_fault());
    println!("Frame size:      {}x{}", size.width, size.height);
    println!("Bus mode:        {:?}", state.bus_mode);
    println!("Crystal:         {} Hz", state.crystal_hz);
    println!("VT profile:      {}", state.vt_mode);
    println!("Dataline test:   {}", state.dataline_test);
    println!();
    println!("Last applied controls:");
    println!("  Exposure:      {:?}", state.user.exposure);
    println!("  White balance: {:?}", state.user.white_balance);
    println!("  Effect:        {:?}", state.user.effect);
    println!("  Frame rate:    {:?}", state.user.frame_rate);
    println!("  Blur:          {:?}", state.user.blur);
}
