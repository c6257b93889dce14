//! SuppliCore command-line front end.
//!
//! The binary is the presentation layer: it parses operator input, resolves
//! the startup configuration, and renders core results. All record and
//! report logic lives in `supplicore-core`.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use supplicore_core::{
    generate_report, CoreConfig, Mrn, NewSupplement, NonEmptyText, PatientRecord, PatientStore,
    ReportInput, ReportOutput, ReportStore, Settings, Sex, SupplementStore,
};

#[derive(Parser)]
#[command(name = "supplicore")]
#[command(about = "SuppliCore nutrition and supplement database manager")]
struct Cli {
    /// Path to the settings file
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage patient records
    #[command(subcommand)]
    Patient(PatientCommands),
    /// Manage supplement reference data
    #[command(subcommand)]
    Supplement(SupplementCommands),
    /// Generate a nutrition-support report for a patient
    Report {
        /// Medical record number of the patient
        mrn: Mrn,
        /// Report date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,
        /// Also save the report to the report directory
        #[arg(long)]
        save: bool,
        #[arg(long, default_value = "")]
        feeding_schedule: String,
        #[arg(long, default_value = "")]
        method_of_delivery: String,
        #[arg(long, default_value = "")]
        home_recipe: String,
        #[arg(long, default_value = "")]
        fluids: String,
        #[arg(long, default_value = "")]
        solids: String,
        #[arg(long, default_value = "")]
        medications: String,
    },
    /// Load and display a previously saved report file
    ImportReport {
        /// Path to the report JSON file
        file: PathBuf,
    },
    /// Show or update the settings file
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Subcommand)]
enum PatientCommands {
    /// Add a new patient record
    Add {
        /// Medical record number, unique and immutable
        mrn: Mrn,
        /// First name
        first_name: NonEmptyText,
        /// Last name
        last_name: NonEmptyText,
        /// Sex (M, F or unknown)
        sex: Sex,
        /// Date of birth (YYYY-MM-DD)
        dob: NaiveDate,
        /// Current weight in kilograms
        weight_kg: f64,
        /// Middle name (optional)
        #[arg(long)]
        middle_name: Option<String>,
    },
    /// List all patients
    List,
    /// Show one patient record
    Show { mrn: Mrn },
    /// Update fields of an existing patient record
    Update {
        /// Medical record number of the patient to update
        mrn: Mrn,
        #[arg(long)]
        first_name: Option<NonEmptyText>,
        #[arg(long)]
        middle_name: Option<String>,
        #[arg(long)]
        last_name: Option<NonEmptyText>,
        /// Sex (M, F or unknown)
        #[arg(long)]
        sex: Option<Sex>,
        /// Date of birth (YYYY-MM-DD)
        #[arg(long)]
        dob: Option<NaiveDate>,
        #[arg(long)]
        weight_kg: Option<f64>,
    },
    /// Update a patient's recorded weight
    SetWeight { mrn: Mrn, weight_kg: f64 },
    /// Delete a patient record
    Delete { mrn: Mrn },
}

#[derive(Subcommand)]
enum SupplementCommands {
    /// Add a supplement
    Add {
        /// Supplement name
        name: NonEmptyText,
        /// Energy density, kcal per serving
        kcal: f64,
        /// Fluid displacement per serving, in mL
        displacement_ml: f64,
        /// Free-text notes
        #[arg(long)]
        notes: Option<String>,
    },
    /// List all supplements
    List,
    /// Delete a supplement by id
    Delete { id: u32 },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Print the active settings
    Show,
    /// Update settings values and rewrite the settings file
    Set {
        #[arg(long)]
        data_dir: Option<String>,
        #[arg(long)]
        report_dir: Option<String>,
    },
}

fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("supplicore=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut settings =
        Settings::load_or_default(&cli.config).context("failed to load settings")?;
    if let Ok(dir) = std::env::var("SUPPLICORE_DATA_DIR") {
        settings.data_dir = dir;
    }
    let cfg = Arc::new(settings.to_core_config()?);
    tracing::info!("using data directory {}", settings.data_dir);

    match cli.command {
        Commands::Patient(command) => run_patient(command, cfg)?,
        Commands::Supplement(command) => run_supplement(command, cfg)?,
        Commands::Report {
            mrn,
            date,
            save,
            feeding_schedule,
            method_of_delivery,
            home_recipe,
            fluids,
            solids,
            medications,
        } => {
            let patients = PatientStore::new(cfg.clone());
            let input = ReportInput {
                current_date: date,
                feeding_schedule,
                method_of_delivery,
                home_recipe,
                fluids,
                solids,
                medications,
            };
            let report = generate_report(&patients, mrn, input)?;
            print_report(&report);

            if save {
                let path = ReportStore::new(cfg).save(&report)?;
                println!("Saved as {}", path.display());
            }
        }
        Commands::ImportReport { file } => {
            let report = ReportStore::new(cfg).load(&file)?;
            print_report(&report);
        }
        Commands::Config(command) => run_config(command, &cli.config, settings)?,
    }

    Ok(())
}

fn run_patient(command: PatientCommands, cfg: Arc<CoreConfig>) -> anyhow::Result<()> {
    let store = PatientStore::new(cfg);

    match command {
        PatientCommands::Add {
            mrn,
            first_name,
            last_name,
            sex,
            dob,
            weight_kg,
            middle_name,
        } => {
            store.create(&PatientRecord {
                mrn,
                first_name,
                middle_name,
                last_name,
                sex,
                date_of_birth: dob,
                weight_kg,
                last_updated: None,
            })?;
            println!("Created patient with MRN {mrn}");
        }
        PatientCommands::List => {
            let patients = store.list();
            if patients.is_empty() {
                println!("No patients found.");
            } else {
                for patient in patients {
                    println!(
                        "MRN: {}, Name: {}, {}, Sex: {}, DOB: {}, Weight: {} kg",
                        patient.mrn,
                        patient.last_name,
                        patient.first_name,
                        patient.sex,
                        patient.date_of_birth,
                        patient.weight_kg
                    );
                }
            }
        }
        PatientCommands::Show { mrn } => {
            let patient = store.get(mrn)?;
            println!("{}", serde_json::to_string_pretty(&patient)?);
        }
        PatientCommands::Update {
            mrn,
            first_name,
            middle_name,
            last_name,
            sex,
            dob,
            weight_kg,
        } => {
            let mut patient = store.get(mrn)?;
            if let Some(name) = first_name {
                patient.first_name = name;
            }
            if let Some(name) = middle_name {
                patient.middle_name = Some(name);
            }
            if let Some(name) = last_name {
                patient.last_name = name;
            }
            if let Some(sex) = sex {
                patient.sex = sex;
            }
            if let Some(dob) = dob {
                patient.date_of_birth = dob;
            }
            if let Some(weight) = weight_kg {
                patient.weight_kg = weight;
            }
            store.update(&patient)?;
            println!("Updated patient with MRN {mrn}");
        }
        PatientCommands::SetWeight { mrn, weight_kg } => {
            store.update_weight(mrn, weight_kg)?;
            println!("Updated weight for MRN {mrn} to {weight_kg} kg");
        }
        PatientCommands::Delete { mrn } => {
            store.delete(mrn)?;
            println!("Deleted patient with MRN {mrn}");
        }
    }

    Ok(())
}

fn run_supplement(command: SupplementCommands, cfg: Arc<CoreConfig>) -> anyhow::Result<()> {
    let store = SupplementStore::new(cfg);

    match command {
        SupplementCommands::Add {
            name,
            kcal,
            displacement_ml,
            notes,
        } => {
            let supplement = store.add(NewSupplement {
                name,
                kcal,
                displacement_ml,
                notes,
            })?;
            println!("Added supplement {} (id {})", supplement.name, supplement.id);
        }
        SupplementCommands::List => {
            let supplements = store.list();
            if supplements.is_empty() {
                println!("No supplements found.");
            } else {
                for supplement in supplements {
                    let notes = supplement
                        .notes
                        .as_deref()
                        .map(|n| format!(", Notes: {n}"))
                        .unwrap_or_default();
                    println!(
                        "id: {}, Name: {}, kcal: {}, Displacement: {} mL{}",
                        supplement.id,
                        supplement.name,
                        supplement.kcal,
                        supplement.displacement_ml,
                        notes
                    );
                }
            }
        }
        SupplementCommands::Delete { id } => {
            store.delete(id)?;
            println!("Deleted supplement {id}");
        }
    }

    Ok(())
}

fn run_config(
    command: ConfigCommands,
    path: &std::path::Path,
    mut settings: Settings,
) -> anyhow::Result<()> {
    match command {
        ConfigCommands::Show => {
            println!("{}", serde_json::to_string_pretty(&settings)?);
        }
        ConfigCommands::Set {
            data_dir,
            report_dir,
        } => {
            if let Some(dir) = data_dir {
                settings.data_dir = dir;
            }
            if let Some(dir) = report_dir {
                settings.report_dir = dir;
            }
            settings.save(path)?;
            println!("Settings written to {}", path.display());
        }
    }

    Ok(())
}

fn print_report(report: &ReportOutput) {
    let header = &report.header;
    let calc = &report.calculations;

    println!("Nutrition support report for {}", header.current_date);
    println!("Patient:  {} (MRN {})", header.name, header.mrn);
    println!("Sex: {}   DOB: {}   Age: {}", header.sex, header.date_of_birth, header.age);
    println!("Weight:   {} kg", header.weight_kg);

    for (label, value) in [
        ("Feeding schedule", &header.feeding_schedule),
        ("Method of delivery", &header.method_of_delivery),
        ("Home recipe", &header.home_recipe),
        ("Fluids", &header.fluids),
        ("Solids", &header.solids),
        ("Medications", &header.medications),
    ] {
        if !value.is_empty() {
            println!("{label}: {value}");
        }
    }

    println!();
    println!(
        "Holliday-Segar maintenance: {:.1} mL/day",
        calc.holliday_segar.maintenance_ml_per_day
    );
    println!(
        "Holliday-Segar sick day:    {:.1} mL/day",
        calc.holliday_segar.sick_day_ml_per_day
    );
    println!("WHO REE:                    {:.1} kcal/day", calc.who_ree_kcal_per_day);
}
