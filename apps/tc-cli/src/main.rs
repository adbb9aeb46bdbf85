use clap::{Args, Parser, Subcommand};
use tc_fluids::{
    FluidError, FluidHandle, PropertyPair, SaturationPoint, SweepDefinition, SweepType,
    ThermodynamicState, filter_catalog, isobar_sweep, resolve, resolve_fluid,
    saturation_at_pressure, saturation_at_temperature, saturation_dome,
};
use tc_process::{
    IsobaricTarget, IsochoricTarget, ProcessEngine, ProcessError, ProcessResult, ProcessSpec,
};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

#[derive(Error, Debug)]
enum CliError {
    #[error(transparent)]
    Fluid(#[from] FluidError),

    #[error(transparent)]
    Process(#[from] ProcessError),

    #[error("{0}")]
    Usage(&'static str),
}

type CliResult<T> = Result<T, CliError>;

#[derive(Parser)]
#[command(name = "tc-cli")]
#[command(about = "ThermoCalc CLI - thermodynamic properties and processes", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported fluids, optionally filtered by a search term
    Fluids {
        /// Substring of a name or alias
        query: Option<String>,
    },
    /// Resolve a state from two independent properties
    Property(StateArgs),
    /// Saturation properties at a temperature or pressure
    Saturation {
        /// Fluid name (case-insensitive)
        #[arg(short, long)]
        fluid: String,
        /// Saturation temperature [°C]
        #[arg(short, long, conflicts_with = "pressure")]
        temp: Option<f64>,
        /// Saturation pressure [kPa]
        #[arg(short, long)]
        pressure: Option<f64>,
    },
    /// Tabulate the saturation dome
    Dome {
        /// Fluid name (case-insensitive)
        #[arg(short, long)]
        fluid: String,
        /// Number of points
        #[arg(short, long, default_value_t = 20)]
        points: usize,
    },
    /// Tabulate states along an isobar
    Isobar {
        /// Fluid name (case-insensitive)
        #[arg(short, long)]
        fluid: String,
        /// Pressure [kPa]
        #[arg(short, long)]
        pressure: f64,
        /// First temperature [°C]
        #[arg(long)]
        from: f64,
        /// Last temperature [°C]
        #[arg(long)]
        to: f64,
        /// Number of points
        #[arg(short = 'n', long, default_value_t = 20)]
        points: usize,
    },
    /// Apply a thermodynamic process to an inlet state
    #[command(subcommand)]
    Process(ProcessCommands),
}

/// A fluid and exactly two independent properties.
#[derive(Args)]
struct StateArgs {
    /// Fluid name (case-insensitive)
    #[arg(short, long)]
    fluid: String,
    /// Temperature [°C]
    #[arg(short, long)]
    temp: Option<f64>,
    /// Pressure [kPa]
    #[arg(short, long)]
    pressure: Option<f64>,
    /// Specific enthalpy [kJ/kg]
    #[arg(long)]
    enthalpy: Option<f64>,
    /// Specific entropy [kJ/(kg·K)]
    #[arg(long)]
    entropy: Option<f64>,
    /// Vapor quality [0-1]
    #[arg(short, long)]
    quality: Option<f64>,
    /// Specific volume [m³/kg]
    #[arg(long)]
    volume: Option<f64>,
}

impl StateArgs {
    fn pair(&self) -> CliResult<(PropertyPair, f64, f64)> {
        let given = [
            self.enthalpy,
            self.entropy,
            self.quality,
            self.volume,
            self.temp,
            self.pressure,
        ]
        .iter()
        .filter(|v| v.is_some())
        .count();
        if given != 2 {
            return Err(CliError::Usage(
                "exactly two of --temp, --pressure, --enthalpy, --entropy, --quality, --volume are required",
            ));
        }

        let pair = match (self.temp, self.pressure) {
            (Some(t), Some(p)) => (PropertyPair::TemperaturePressure, t, p),
            (_, Some(p)) => match (self.enthalpy, self.entropy, self.quality, self.volume) {
                (Some(h), ..) => (PropertyPair::PressureEnthalpy, p, h),
                (_, Some(s), ..) => (PropertyPair::PressureEntropy, p, s),
                (_, _, Some(x), _) => (PropertyPair::PressureQuality, p, x),
                (.., Some(v)) => (PropertyPair::PressureVolume, p, v),
                _ => return Err(CliError::Usage("missing second property")),
            },
            (Some(t), None) => match (self.quality, self.volume) {
                (Some(x), _) => (PropertyPair::TemperatureQuality, t, x),
                (_, Some(v)) => (PropertyPair::TemperatureVolume, t, v),
                _ => {
                    return Err(CliError::Usage(
                        "with --temp, give --pressure, --quality or --volume",
                    ));
                }
            },
            (None, None) => match (self.enthalpy, self.entropy) {
                (Some(h), Some(s)) => (PropertyPair::EnthalpyEntropy, h, s),
                _ => {
                    return Err(CliError::Usage(
                        "give --temp or --pressure, or both --enthalpy and --entropy",
                    ));
                }
            },
        };
        Ok(pair)
    }

    fn resolve(&self) -> CliResult<(FluidHandle, ThermodynamicState)> {
        let handle = resolve_fluid(&self.fluid)?;
        let (pair, first, second) = self.pair()?;
        let state = resolve(&handle, pair, first, second)?;
        Ok((handle, state))
    }
}

#[derive(Subcommand)]
enum ProcessCommands {
    /// Adiabatic compression or expansion with an isentropic efficiency
    Isentropic {
        #[command(flatten)]
        inlet: StateArgs,
        /// Outlet pressure [kPa]
        #[arg(long)]
        outlet_pressure: f64,
        /// Isentropic efficiency (0, 1]
        #[arg(long, default_value_t = 1.0)]
        efficiency: f64,
    },
    /// Constant-pressure heating or cooling
    Isobaric {
        #[command(flatten)]
        inlet: StateArgs,
        /// Outlet temperature [°C]
        #[arg(long, conflicts_with = "target_enthalpy")]
        target_temp: Option<f64>,
        /// Outlet enthalpy [kJ/kg]
        #[arg(long)]
        target_enthalpy: Option<f64>,
    },
    /// Constant-volume heating or cooling
    Isochoric {
        #[command(flatten)]
        inlet: StateArgs,
        /// Outlet temperature [°C]
        #[arg(long, conflicts_with = "target_pressure")]
        target_temp: Option<f64>,
        /// Outlet pressure [kPa]
        #[arg(long)]
        target_pressure: Option<f64>,
    },
    /// Isenthalpic expansion through a valve
    Throttling {
        #[command(flatten)]
        inlet: StateArgs,
        /// Outlet pressure [kPa]
        #[arg(long)]
        outlet_pressure: f64,
    },
    /// Polytropic process P·v^n = const
    Polytropic {
        #[command(flatten)]
        inlet: StateArgs,
        /// Outlet pressure [kPa]
        #[arg(long)]
        outlet_pressure: f64,
        /// Polytropic exponent n
        #[arg(short = 'n', long)]
        exponent: f64,
    },
}

impl ProcessCommands {
    fn split(&self) -> CliResult<(&StateArgs, ProcessSpec)> {
        let split = match *self {
            Self::Isentropic {
                ref inlet,
                outlet_pressure,
                efficiency,
            } => (inlet, ProcessSpec::isentropic(outlet_pressure, efficiency)),
            Self::Isobaric {
                ref inlet,
                target_temp,
                target_enthalpy,
            } => {
                let target = match (target_temp, target_enthalpy) {
                    (Some(t), _) => IsobaricTarget::Temperature(t),
                    (_, Some(h)) => IsobaricTarget::Enthalpy(h),
                    _ => {
                        return Err(CliError::Usage(
                            "isobaric needs --target-temp or --target-enthalpy",
                        ));
                    }
                };
                (inlet, ProcessSpec::isobaric(target))
            }
            Self::Isochoric {
                ref inlet,
                target_temp,
                target_pressure,
            } => {
                let target = match (target_temp, target_pressure) {
                    (Some(t), _) => IsochoricTarget::Temperature(t),
                    (_, Some(p)) => IsochoricTarget::Pressure(p),
                    _ => {
                        return Err(CliError::Usage(
                            "isochoric needs --target-temp or --target-pressure",
                        ));
                    }
                };
                (inlet, ProcessSpec::isochoric(target))
            }
            Self::Throttling {
                ref inlet,
                outlet_pressure,
            } => (inlet, ProcessSpec::throttling(outlet_pressure)),
            Self::Polytropic {
                ref inlet,
                outlet_pressure,
                exponent,
            } => (inlet, ProcessSpec::polytropic(outlet_pressure, exponent)),
        };
        Ok(split)
    }
}

fn main() -> CliResult<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fluids { query } => cmd_fluids(query.as_deref().unwrap_or("")),
        Commands::Property(args) => cmd_property(&args),
        Commands::Saturation {
            fluid,
            temp,
            pressure,
        } => cmd_saturation(&fluid, temp, pressure),
        Commands::Dome { fluid, points } => cmd_dome(&fluid, points),
        Commands::Isobar {
            fluid,
            pressure,
            from,
            to,
            points,
        } => cmd_isobar(&fluid, pressure, from, to, points),
        Commands::Process(process) => cmd_process(&process),
    }
}

fn cmd_fluids(query: &str) -> CliResult<()> {
    let entries = filter_catalog(query);
    if entries.is_empty() {
        println!("No fluids match '{}'", query);
        return Ok(());
    }
    println!("{:<8} {:<16} Aliases", "Id", "Name");
    for entry in entries {
        println!(
            "{:<8} {:<16} {}",
            entry.canonical_id,
            entry.display_name,
            entry.aliases.join(", ")
        );
    }
    Ok(())
}

fn cmd_property(args: &StateArgs) -> CliResult<()> {
    let (_, state) = args.resolve()?;
    print_state("State", &state);
    Ok(())
}

fn cmd_saturation(fluid: &str, temp: Option<f64>, pressure: Option<f64>) -> CliResult<()> {
    let handle = resolve_fluid(fluid)?;
    let sat = match (temp, pressure) {
        (Some(t), _) => saturation_at_temperature(&handle, t)?,
        (_, Some(p)) => saturation_at_pressure(&handle, p)?,
        _ => return Err(CliError::Usage("saturation needs --temp or --pressure")),
    };
    print_saturation(&sat);
    Ok(())
}

fn cmd_dome(fluid: &str, points: usize) -> CliResult<()> {
    let handle = resolve_fluid(fluid)?;
    let dome = saturation_dome(&handle, points)?;
    println!(
        "{:>9} {:>11} {:>10} {:>10} {:>9} {:>9}",
        "T [°C]", "P [kPa]", "h_f", "h_g", "s_f", "s_g"
    );
    for sat in dome {
        println!(
            "{:>9.2} {:>11.3} {:>10.2} {:>10.2} {:>9.4} {:>9.4}",
            sat.temperature_c, sat.pressure_kpa, sat.h_f, sat.h_g, sat.s_f, sat.s_g
        );
    }
    Ok(())
}

fn cmd_isobar(fluid: &str, pressure: f64, from: f64, to: f64, points: usize) -> CliResult<()> {
    let handle = resolve_fluid(fluid)?;
    let sweep = SweepDefinition::new(from, to, points, SweepType::Linear)?;
    let result = isobar_sweep(&handle, pressure, &sweep);
    println!(
        "{:>9} {:>10} {:>9} {:>12}  Phase",
        "T [°C]", "h", "s", "v"
    );
    for (t, state) in result.independent_values.iter().zip(&result.states) {
        match state {
            Some(s) => println!(
                "{:>9.2} {:>10.2} {:>9.4} {:>12.6}  {}",
                t,
                s.enthalpy(),
                s.entropy(),
                s.specific_volume(),
                s.phase()
            ),
            None => println!("{:>9.2} {:>10}", t, "failed"),
        }
    }
    if result.num_failed > 0 {
        println!(
            "{} of {} points failed",
            result.num_failed,
            result.independent_values.len()
        );
    }
    Ok(())
}

fn cmd_process(command: &ProcessCommands) -> CliResult<()> {
    let (inlet_args, spec) = command.split()?;
    let (handle, inlet) = inlet_args.resolve()?;
    let result = ProcessEngine::new().run(&handle, &inlet, &spec)?;
    print_process(&result);
    Ok(())
}

fn print_state(title: &str, state: &ThermodynamicState) {
    println!("{} ({}):", title, state.fluid().display_name());
    println!("  Phase:        {}", state.phase());
    println!("  Temperature:  {:.3} °C", state.temperature_c());
    println!("  Pressure:     {:.3} kPa", state.pressure_kpa());
    println!("  Enthalpy:     {:.3} kJ/kg", state.enthalpy());
    println!("  Entropy:      {:.5} kJ/(kg·K)", state.entropy());
    println!("  Volume:       {:.6} m³/kg", state.specific_volume());
    println!("  Density:      {:.4} kg/m³", state.density());
    println!("  Int. energy:  {:.3} kJ/kg", state.internal_energy());
    if let Some(x) = state.quality() {
        println!("  Quality:      {:.4}", x);
    }
}

fn print_saturation(sat: &SaturationPoint) {
    println!("Saturation ({}):", sat.fluid.display_name());
    println!("  T_sat:  {:.3} °C", sat.temperature_c);
    println!("  P_sat:  {:.3} kPa", sat.pressure_kpa);
    println!(
        "  h:      {:.3} / {:.3} kJ/kg (h_fg {:.3})",
        sat.h_f,
        sat.h_g,
        sat.h_fg()
    );
    println!(
        "  s:      {:.5} / {:.5} kJ/(kg·K) (s_fg {:.5})",
        sat.s_f,
        sat.s_g,
        sat.s_fg()
    );
    println!("  v:      {:.6} / {:.6} m³/kg", sat.v_f, sat.v_g);
}

fn print_process(result: &ProcessResult) {
    println!("Process: {}", result.kind);
    print_state("Inlet", &result.inlet);
    if let Some(ideal) = &result.ideal {
        print_state("Isentropic outlet", ideal);
    }
    print_state("Outlet", &result.outlet);
    println!("Work:    {:.3} kJ/kg", result.work);
    println!("Heat:    {:.3} kJ/kg", result.heat);
    println!("ΔT:      {:.3} K", result.temperature_change());
    println!("Δs:      {:.5} kJ/(kg·K)", result.entropy_generation());
}
