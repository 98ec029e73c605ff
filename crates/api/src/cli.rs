//! Command-line surface

use std::path::PathBuf;
use std::str::FromStr;

use agenda_core::pages::StatusFilter;
use agenda_domain::{Frequency, ScheduleKind};
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "agenda", version, about = "Manage scheduled message dispatches")]
pub struct Cli {
    /// Config file (TOML or JSON); probed in the working directory when absent
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// IANA time zone used to show and enter dates (defaults to $TZ, then UTC)
    #[arg(long, global = true, env = "AGENDA_TZ", value_name = "ZONE")]
    pub tz: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    pub log_json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Status counts and the most recent schedules
    Dashboard,
    /// One page of schedules
    List(ListArgs),
    /// Full details of one schedule
    Show { id: String },
    /// Create a schedule
    Create(FormArgs),
    /// Edit a pending schedule; only the given fields change
    Edit {
        id: String,
        #[command(flatten)]
        form: FormArgs,
    },
    /// Cancel a pending schedule
    Cancel {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

#[derive(Debug, Clone, Args)]
pub struct ListArgs {
    /// all, scheduled, sent or canceled
    #[arg(long, default_value = "all")]
    pub status: StatusFilter,
    #[arg(long, default_value_t = 1)]
    pub page: u32,
    /// Page size (defaults to the configured page size)
    #[arg(long)]
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct FormArgs {
    #[arg(long, short = 'm')]
    pub message: Option<String>,
    /// YYYY-MM-DD
    #[arg(long)]
    pub date: Option<String>,
    /// HH:MM (24h)
    #[arg(long)]
    pub time: Option<String>,
    /// once or recurring
    #[arg(long = "type", value_name = "TYPE")]
    pub kind: Option<ScheduleKind>,
    /// daily, weekly or monthly
    #[arg(long)]
    pub frequency: Option<Frequency>,
    /// NAME:PHONE, repeat for several recipients; replaces existing contacts
    #[arg(long = "contact", value_name = "NAME:PHONE")]
    pub contacts: Vec<ContactArg>,
}

/// `NAME:PHONE` recipient; split at the last colon
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactArg {
    pub name: String,
    pub phone: String,
}

impl FromStr for ContactArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, phone) = s
            .rsplit_once(':')
            .ok_or_else(|| format!("Invalid contact '{s}': expected NAME:PHONE"))?;
        Ok(Self { name: name.to_string(), phone: phone.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use agenda_domain::ScheduleStatus;

    use super::*;

    #[test]
    fn parses_create_arguments() {
        let cli = Cli::try_parse_from([
            "agenda",
            "create",
            "-m",
            "Bom dia",
            "--date",
            "2025-03-10",
            "--type",
            "recurring",
            "--frequency",
            "weekly",
            "--contact",
            "Ana:+5511999990000",
            "--contact",
            "Bia:123",
        ])
        .unwrap();

        let Command::Create(form) = cli.command else { panic!("expected create") };
        assert_eq!(form.kind, Some(ScheduleKind::Recurring));
        assert_eq!(form.frequency, Some(Frequency::Weekly));
        assert_eq!(form.contacts.len(), 2);
        assert_eq!(form.contacts[0], ContactArg { name: "Ana".into(), phone: "+5511999990000".into() });
        assert_eq!(form.time, None);
    }

    #[test]
    fn list_defaults_to_all_first_page() {
        let cli = Cli::try_parse_from(["agenda", "list"]).unwrap();
        let Command::List(args) = cli.command else { panic!("expected list") };
        assert_eq!(args.status, StatusFilter::All);
        assert_eq!(args.page, 1);
        assert_eq!(args.limit, None);

        let cli = Cli::try_parse_from(["agenda", "list", "--status", "sent", "--page", "3"]).unwrap();
        let Command::List(args) = cli.command else { panic!("expected list") };
        assert_eq!(args.status, StatusFilter::Only(ScheduleStatus::Sent));
        assert_eq!(args.page, 3);
    }

    #[test]
    fn rejects_unknown_frequency() {
        let result = Cli::try_parse_from(["agenda", "create", "--frequency", "hourly"]);
        assert!(result.is_err());
    }

    #[test]
    fn contact_without_separator_is_rejected() {
        assert!("Ana".parse::<ContactArg>().is_err());
        let contact: ContactArg = "Dr. A: B:+55".parse().unwrap();
        assert_eq!(contact.name, "Dr. A: B");
        assert_eq!(contact.phone, "+55");
    }
}
