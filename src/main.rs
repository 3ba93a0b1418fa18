use clap::Parser;
use securepass::cli::{Cli, Commands};
use securepass::generator::CharClasses;

fn main() {
    let cli = Cli::parse();
    securepass::logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Init => securepass::cli::commands::init::execute(&cli),
        Commands::Login => securepass::cli::commands::login::execute(&cli),
        Commands::Save {
            ref site,
            ref username,
            ref password,
            generate,
            length,
        } => securepass::cli::commands::save::execute(
            &cli,
            site,
            username.as_deref(),
            password.as_deref(),
            generate,
            length,
        ),
        Commands::Show { ref site, copy } => {
            securepass::cli::commands::show::execute(&cli, site, copy)
        }
        Commands::List => securepass::cli::commands::list::execute(&cli),
        Commands::Delete { ref site, force } => {
            securepass::cli::commands::delete::execute(&cli, site, force)
        }
        Commands::Generate {
            length,
            no_upper,
            no_lower,
            no_digits,
            no_symbols,
            copy,
        } => {
            let classes = CharClasses {
                upper: !no_upper,
                lower: !no_lower,
                digits: !no_digits,
                symbols: !no_symbols,
            };
            securepass::cli::commands::generate::execute(&cli, length, classes, copy)
        }
        Commands::Reset { force } => securepass::cli::commands::reset::execute(&cli, force),
        Commands::Completions { shell } => securepass::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        securepass::cli::output::error(&e.to_string());
        std::process::exit(e.exit_code());
    }
}
