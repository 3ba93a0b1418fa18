//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::{Credential, SiteSlug};

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of saved sites (display name and slug).
pub fn print_sites_table(sites: &[SiteSlug]) {
    if sites.is_empty() {
        info("No saved passwords yet.");
        tip("Run `securepass save <SITE>` to add your first one.");
        return;
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["Site", "Slug"]);

    for slug in sites {
        table.add_row(vec![slug.display_name(), slug.to_string()]);
    }

    println!("{table}");
}

/// Print a credential; the password line is skipped when `reveal` is false.
pub fn print_credential(credential: &Credential, reveal: bool) {
    println!("{} {}", style("Site:    ").bold(), credential.site);
    println!("{} {}", style("Username:").bold(), credential.username);
    if reveal {
        println!("{} {}", style("Password:").bold(), credential.password);
    }
    if let Some(saved_at) = credential.saved_at {
        println!(
            "{} {}",
            style("Saved:   ").dim(),
            style(saved_at.format("%Y-%m-%d %H:%M:%S")).dim()
        );
    }
}
