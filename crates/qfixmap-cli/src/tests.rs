use super::*;

#[test]
fn parses_resolve_with_all_flags() {
    let cli = Cli::try_parse_from([
        "qfixmap-cli",
        "resolve",
        "--clothing-type",
        "Dam > Jeans",
        "--material",
        "99% Bomull, 1% Elastan",
        "--gender",
        "dam",
        "--brand",
        "kappahl",
        "--json",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Resolve {
            ref clothing_type,
            ref gender,
            json: true,
            ..
        } if clothing_type == "Dam > Jeans" && gender == "dam"
    ));
}

#[test]
fn resolve_defaults_optional_flags_to_empty() {
    let cli = Cli::try_parse_from(["qfixmap-cli", "resolve", "--clothing-type", "Byxor"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Resolve {
            ref material,
            ref gender,
            ref brand,
            json: false,
            ..
        } if material.is_empty() && gender.is_empty() && brand.is_empty()
    ));
}

#[test]
fn resolve_requires_clothing_type() {
    assert!(Cli::try_parse_from(["qfixmap-cli", "resolve"]).is_err());
}

#[test]
fn parses_merge_with_both_files() {
    let cli = Cli::try_parse_from([
        "qfixmap-cli",
        "merge",
        "--scraper",
        "scraped.json",
        "--protocol",
        "protocol.json",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Merge { ref scraper, ref protocol }
            if scraper.as_os_str() == "scraped.json" && protocol.as_os_str() == "protocol.json"
    ));
}

#[test]
fn merge_requires_both_files() {
    assert!(Cli::try_parse_from(["qfixmap-cli", "merge", "--scraper", "scraped.json"]).is_err());
}

#[test]
fn parses_unmapped_with_catalog() {
    let cli = Cli::try_parse_from(["qfixmap-cli", "unmapped", "--catalog", "rows.json"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Unmapped { ref catalog } if catalog.as_os_str() == "rows.json"
    ));
}

#[test]
fn no_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["qfixmap-cli"]).is_err());
}
