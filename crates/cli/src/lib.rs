use clap::Parser;
use memberscope_core::Outcome;
use memberscope_java::{JavaTypeRegistry, RegistryOptions};
use std::ffi::OsString;
use std::io;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "memberscope",
    version,
    about = "Lists the public fields and methods of a JVM class",
    long_about = "Prompts for a fully qualified class name, resolves it against the JDK runtime image \
                  and the application class path, and prints every public field and method, own and \
                  inherited, sorted by name. Static members are prefixed with `S:`."
)]
pub struct Cli {
    /// Application class path, separated like CLASSPATH. Overrides the CLASSPATH variable.
    #[arg(long, value_name = "PATH_LIST")]
    pub class_path: Option<OsString>,

    /// JDK home to load bootstrap classes from, instead of discovering one
    #[arg(long, value_name = "DIR")]
    pub java_home: Option<PathBuf>,

    /// Do not search the JDK; resolve against the application class path only
    #[arg(long, conflicts_with = "java_home")]
    pub no_jdk: bool,

    /// Also write log events to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    pub fn registry_options(&self) -> RegistryOptions {
        RegistryOptions {
            java_home: self.java_home.clone(),
            class_path: self.class_path.clone(),
            include_jdk: !self.no_jdk,
        }
    }
}

pub fn run() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let _guard = memberscope_core::logging::init_logging("memberscope", cli.verbose);

    let registry = JavaTypeRegistry::from_options(&cli.registry_options())?;

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut stderr = io::stderr().lock();
    let outcome = memberscope_core::run(&registry, stdin.lock(), &mut stdout, &mut stderr)?;

    match outcome {
        Outcome::Listed { fields, methods } => {
            tracing::debug!("Listed {} fields and {} methods", fields, methods)
        }
        Outcome::UnknownClass => tracing::debug!("Session ended on an unknown class name"),
    }
    Ok(())
}
