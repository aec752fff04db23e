#![deny(unsafe_code)]
//! CLI binary for shaderdeck.
//!
//! Subcommands:
//! - `list`: print the registered presets and their extra controls
//! - `source <preset>`: print a preset's GLSL
//! - `render [preset] [--config file]`: shade one frame on the CPU, write PNG
//! - `randomize`: draw a pair of shared control values

mod config;
mod error;

use clap::{Parser, Subcommand};
use error::CliError;
use shaderdeck_core::preset::{self, PRESETS};
use shaderdeck_core::render::VERTEX_SHADER;
use shaderdeck_core::{RandomizedControls, Xorshift64};
use shaderdeck_preview::Still;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "shaderdeck", about = "Animated shader preset CLI")]
struct Cli {
    /// Output as JSON instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List available presets.
    List,
    /// Print the GLSL source of a preset.
    Source {
        /// Preset key (e.g. "swirl").
        preset: String,

        /// Print the shared vertex shader instead of the fragment shader.
        #[arg(long)]
        vertex: bool,
    },
    /// Shade one frame of a preset and write a PNG preview.
    Render {
        /// Preset key (e.g. "noise"); overrides the config file.
        preset: Option<String>,

        /// A deck config JSON file to start from.
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// Canvas width in pixels.
        #[arg(short = 'W', long, default_value_t = 256)]
        width: u32,

        /// Canvas height in pixels.
        #[arg(short = 'H', long, default_value_t = 256)]
        height: u32,

        /// Seconds since the animation started.
        #[arg(short, long, default_value_t = 0.0)]
        time: f32,

        /// Noise factor control value.
        #[arg(long)]
        noise_factor: Option<f32>,

        /// Time speed control value.
        #[arg(long)]
        time_speed: Option<f32>,

        /// Preset extras as a JSON object keyed by uniform name.
        #[arg(long)]
        params: Option<String>,

        /// Output file path.
        #[arg(short, long, default_value = "preview.png")]
        output: PathBuf,
    },
    /// Draw new noise factor and time speed values.
    Randomize {
        /// PRNG seed for deterministic output.
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
}

fn list(json: bool) -> Result<(), CliError> {
    if json {
        println!("{}", serde_json::to_string_pretty(&preset::catalog())?);
    } else {
        println!("Presets:");
        for p in &PRESETS {
            println!("  {:<14}{}", p.key, p.label);
            for e in p.extras {
                println!(
                    "    {} (default {}, range {}..{})",
                    e.uniform, e.default, e.min, e.max
                );
            }
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<(), CliError> {
    match cli.command {
        Command::List => list(cli.json)?,
        Command::Source { preset: key, vertex } => {
            let preset = preset::lookup(&key)?;
            let source = if vertex {
                VERTEX_SHADER
            } else {
                preset.fragment
            };
            if cli.json {
                let info = serde_json::json!({
                    "preset": preset.key,
                    "stage": if vertex { "vertex" } else { "fragment" },
                    "source": source,
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                print!("{source}");
            }
        }
        Command::Render {
            preset,
            config: config_path,
            width,
            height,
            time,
            noise_factor,
            time_speed,
            params,
            output,
        } => {
            let mut deck_config = config::load(config_path.as_deref())?;
            config::apply(
                &mut deck_config,
                &config::Overrides {
                    preset: preset.as_deref(),
                    noise_factor,
                    time_speed,
                    params: params.as_deref(),
                },
            )?;

            let still = Still::from_config(&deck_config, width, height, time)?;
            shaderdeck_preview::snapshot::write_png(&still, &output)?;

            let preset = still.preset.key;
            if cli.json {
                let info = serde_json::json!({
                    "preset": preset,
                    "width": width,
                    "height": height,
                    "time": time,
                    "noiseFactor": still.uniforms.noise_factor,
                    "timeSpeed": still.uniforms.time_speed,
                    "extras": still
                        .uniforms
                        .extras
                        .iter()
                        .map(|(name, value)| (name.to_string(), serde_json::json!(value)))
                        .collect::<serde_json::Map<_, _>>(),
                    "output": output.display().to_string(),
                });
                println!("{}", serde_json::to_string_pretty(&info)?);
            } else {
                eprintln!(
                    "rendered {preset} ({width}x{height}, t={time}) -> {}",
                    output.display()
                );
            }
        }
        Command::Randomize { seed } => {
            let mut rng = Xorshift64::new(seed);
            let draw = RandomizedControls::draw(&mut rng);
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&draw)?);
            } else {
                println!("noiseFactor {:.1}", draw.noise_factor);
                println!("timeSpeed   {:.1}", draw.time_speed);
            }
        }
    }

    Ok(())
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();
    let json_mode = cli.json;
    if let Err(e) = run(cli) {
        log::debug!("command failed: {e:?}");
        if json_mode {
            let j = serde_json::json!({"error": e.to_string(), "exit_code": e.exit_code()});
            eprintln!("{}", serde_json::to_string_pretty(&j).unwrap_or_default());
        } else {
            eprintln!("error: {e}");
        }
        process::exit(e.exit_code());
    }
}
