use super::*;

#[test]
fn parses_db_ping_command() {
    let cli = Cli::try_parse_from(["bizdir-cli", "db", "ping"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Ping
        })
    ));
}

#[test]
fn parses_db_migrate_command() {
    let cli =
        Cli::try_parse_from(["bizdir-cli", "db", "migrate"]).expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Some(Commands::Db {
            command: DbCommands::Migrate
        })
    ));
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["bizdir-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn ingest_defaults_to_full_grid() {
    let cli = Cli::try_parse_from(["bizdir-cli", "ingest"]).unwrap();
    let Some(Commands::Ingest(args)) = cli.command else {
        panic!("expected ingest command");
    };
    assert!(args.cities.is_empty());
    assert!(args.categories.is_empty());
    assert!(!args.no_details);
    assert!(!args.no_pagination);
    assert!(!args.dry_run);
}

#[test]
fn ingest_accepts_repeated_filters_and_flags() {
    let cli = Cli::try_parse_from([
        "bizdir-cli",
        "ingest",
        "--city",
        "Accra",
        "--city",
        "Kumasi",
        "--category",
        "cafe",
        "--no-details",
        "--no-pagination",
        "--dry-run",
    ])
    .unwrap();
    let Some(Commands::Ingest(args)) = cli.command else {
        panic!("expected ingest command");
    };
    assert_eq!(args.cities, vec!["Accra", "Kumasi"]);
    assert_eq!(args.categories, vec!["cafe"]);
    assert!(args.no_details);
    assert!(args.no_pagination);
    assert!(args.dry_run);
}

#[test]
fn search_defaults_limit_to_six() {
    let cli = Cli::try_parse_from(["bizdir-cli", "search", "--city", "accra"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Search {
            name: None,
            city: Some(ref c),
            category: None,
            limit: 6,
        }) if c == "accra"
    ));
}

#[test]
fn rejects_unknown_subcommand() {
    assert!(Cli::try_parse_from(["bizdir-cli", "collect"]).is_err());
}
