mod inspect;
mod resolve;
mod view;

use clap::{Parser, Subcommand, ValueEnum};
use jbind_core::ArgumentTypes;
use jbind_core::config::JbindConfig;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "jbind",
    version,
    about = "Resolve SQL routine bindings against a universe of Java types",
    long_about = "jbind answers the questions an SQL compiler asks when it binds a routine or \
                  method call onto a Java class: which method or constructor a call resolves to, \
                  which field a reference names, and whether one type converts to another."
)]
pub struct Cli {
    /// Configuration file (defaults to $JBIND_CONFIG, then ~/.jbind/config.json)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// JSON type universe to load on top of the bootstrap types
    #[arg(long, global = true, value_name = "PATH")]
    pub universe: Option<PathBuf>,

    /// Do not seed the universe with the core java.lang types
    #[arg(long, global = true)]
    pub no_java_lang: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve a method call
    #[command(
        long_about = "Resolves NAME on RECEIVER for the given argument types. Each argument is a \
                      type name, `null` for an untyped null, optionally suffixed with `:PRIMITIVE` \
                      for its primitive form and prefixed with `?` for a parameter marker."
    )]
    Method {
        #[arg(value_name = "RECEIVER")]
        receiver: String,
        #[arg(value_name = "NAME")]
        name: String,
        #[arg(value_name = "ARG")]
        args: Vec<String>,
        /// Only static methods qualify
        #[arg(long = "static")]
        static_only: bool,
        /// Trailing formals may repeat the last argument's type
        #[arg(long)]
        repeat_last: bool,
        /// Only varargs methods qualify
        #[arg(long)]
        varargs: bool,
        /// Only check that a public method with this name exists
        #[arg(long, conflicts_with = "args")]
        probe: bool,
    },
    /// Resolve a constructor call
    Constructor {
        #[arg(value_name = "RECEIVER")]
        receiver: String,
        #[arg(value_name = "ARG")]
        args: Vec<String>,
    },
    /// Look up a public field
    Field {
        #[arg(value_name = "RECEIVER")]
        receiver: String,
        #[arg(value_name = "FIELD")]
        field: String,
        /// Only static fields qualify
        #[arg(long = "static")]
        static_only: bool,
    },
    /// Check whether one type converts to another
    Convertible {
        from: String,
        to: String,
        /// Allow primitive/wrapper mixing
        #[arg(long)]
        mix: bool,
    },
    /// List the public members of a type
    Members {
        #[arg(value_name = "TYPE")]
        type_name: String,
        #[arg(long, value_enum, default_value_t = MemberFilter::All)]
        kind: MemberFilter,
        /// Only members with this name
        #[arg(long)]
        name: Option<String>,
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Resolve a type name and describe it
    Type {
        #[arg(value_name = "TYPE")]
        type_name: String,
        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum MemberFilter {
    All,
    Methods,
    Constructors,
    Fields,
}

/// Turn command-line argument tokens into [`ArgumentTypes`].
///
/// `?` marks a parameter, `null` (or nothing) is an untyped null and
/// `TYPE:PRIMITIVE` attaches a primitive form.
pub fn parse_arguments(tokens: &[String]) -> ArgumentTypes {
    let mut object_types = Vec::with_capacity(tokens.len());
    let mut primitive_types = Vec::with_capacity(tokens.len());
    let mut parameters = Vec::with_capacity(tokens.len());

    for token in tokens {
        let (is_parameter, rest) = match token.strip_prefix('?') {
            Some(rest) => (true, rest),
            None => (false, token.as_str()),
        };
        let (object_type, primitive_type) = rest.split_once(':').unwrap_or((rest, ""));
        let object_type = if object_type == "null" { "" } else { object_type };

        object_types.push(object_type.to_string());
        primitive_types.push(primitive_type.to_string());
        parameters.push(is_parameter);
    }

    let arguments = ArgumentTypes::new(object_types).with_parameters(parameters);
    if primitive_types.iter().any(|p| !p.is_empty()) {
        arguments.with_primitives(primitive_types)
    } else {
        arguments
    }
}

pub fn run() -> jbind_core::Result<()> {
    let cli = Cli::parse();

    let mut config = JbindConfig::load(cli.config.as_deref())?;
    if let Some(universe) = cli.universe {
        config.universe = Some(universe);
    }
    if cli.no_java_lang {
        config.bootstrap_java_lang = false;
    }
    let _guard = jbind_core::logging::init_logging("jbind", &config.log)?;

    let inspector = jbind_core::ClassInspector::new(config.build_directory()?);

    match cli.command {
        Commands::Method {
            receiver,
            name,
            args,
            static_only,
            repeat_last,
            varargs,
            probe,
        } => {
            let flags = jbind_core::ResolutionFlags {
                static_only,
                repeat_last_parameter: repeat_last,
                varargs,
            };
            let arguments = (!probe).then(|| parse_arguments(&args));
            resolve::method(&inspector, &receiver, &name, arguments.as_ref(), flags)
        }
        Commands::Constructor { receiver, args } => {
            resolve::constructor(&inspector, &receiver, &parse_arguments(&args))
        }
        Commands::Field {
            receiver,
            field,
            static_only,
        } => resolve::field(&inspector, &receiver, &field, static_only),
        Commands::Convertible { from, to, mix } => inspect::convertible(&inspector, &from, &to, mix),
        Commands::Members {
            type_name,
            kind,
            name,
            json,
        } => inspect::members(&inspector, &type_name, kind, name.as_deref(), json),
        Commands::Type { type_name, json } => inspect::describe_type(&inspector, &type_name, json),
    }
}
