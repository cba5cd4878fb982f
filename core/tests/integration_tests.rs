use cmdline_input_core::{
    CommandLineInput, Diagnostic, DiagnosticKind, InputRegistry, OptionValue, RegistrySpec,
    WriterSink,
};

fn coffee_registry(argv: &[&str]) -> InputRegistry {
    InputRegistry::new(argv.iter().copied())
        .add_flags(["v", "f"])
        .add_options(["sugars", "color"])
}

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

#[test]
fn absent_registered_flags_are_false() {
    let parsed = coffee_registry(&["prog"]).parse();
    assert!(!parsed.flag_value("v", true));
    assert!(!parsed.flag_value("f", true));
}

#[test]
fn absent_registered_options_are_unset_not_default() {
    let parsed = coffee_registry(&["prog"]).parse();
    let default = OptionValue::from("default");
    assert_eq!(parsed.option_value("sugars", &default), &OptionValue::Unset);
    assert_eq!(parsed.option_value("color", &default), &OptionValue::Unset);
}

#[test]
fn unregistered_names_return_caller_default() {
    let parsed = coffee_registry(&["prog", "--milk=yes", "--quiet"]).parse();
    let default = OptionValue::from("none");
    assert!(parsed.flag_value("quiet", true));
    assert!(!parsed.flag_value("quiet", false));
    assert_eq!(parsed.option_value("milk", &default), &default);
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

#[test]
fn parameters_are_one_based_and_contiguous() {
    let parsed = coffee_registry(&["prog", "a", "-v", "b", "--sugars=1", "c", "--bogus", "d"]).parse();
    let expected = ["a", "b", "c", "d"];
    for (i, value) in expected.iter().enumerate() {
        assert_eq!(parsed.parameter(i + 1, "default"), *value);
    }
    assert_eq!(parsed.parameter(expected.len() + 1, "default"), "default");
    assert_eq!(parsed.parameter(0, "default"), "default");
}

// ---------------------------------------------------------------------------
// Flags and options
// ---------------------------------------------------------------------------

#[test]
fn combined_flags_set_every_registered_char() {
    let parsed = coffee_registry(&["prog", "-vf"]).parse();
    assert!(parsed.flag_value("v", false));
    assert!(parsed.flag_value("f", false));
    assert!(!parsed.has_diagnostics());
}

#[test]
fn combined_flags_report_unregistered_char_only() {
    let parsed = coffee_registry(&["prog", "-vq"]).parse();
    assert!(parsed.flag_value("v", false));
    assert_eq!(parsed.flag("q"), None);
    assert_eq!(
        parsed.diagnostics(),
        [Diagnostic::CombinedFlagNotFound {
            flag: 'q',
            combined: "vq".to_string(),
        }]
    );
}

#[test]
fn option_values_split_on_first_equals() {
    let parsed = coffee_registry(&["prog", "--sugars=2", "--color=blue=green"]).parse();
    assert_eq!(parsed.option_str("sugars"), Some("2"));
    assert_eq!(parsed.option_str("color"), Some("blue=green"));
}

#[test]
fn short_option_and_empty_value() {
    let parsed = InputRegistry::new(["prog", "-o=out.txt", "--name="])
        .add_options(["o", "name"])
        .parse();
    assert_eq!(parsed.option_str("o"), Some("out.txt"));
    assert_eq!(parsed.option("name"), Some(&OptionValue::from("")));
}

#[test]
fn makecoffee_end_to_end() {
    let parsed = InputRegistry::new(["prog", "makecoffee", "-v", "--sugars=2", "viennois"])
        .add_flag("v")
        .add_option("sugars")
        .parse();

    assert_eq!(parsed.parameter(1, ""), "makecoffee");
    assert_eq!(parsed.parameter(2, ""), "viennois");
    assert!(parsed.flag_value("v", false));
    assert_eq!(parsed.option_str("sugars"), Some("2"));
    assert!(!parsed.has_diagnostics());
}

// ---------------------------------------------------------------------------
// Diagnostics
// ---------------------------------------------------------------------------

#[test]
fn unregistered_long_flag_reports_once_without_state_change() {
    let parsed = InputRegistry::new(["prog", "--verbose"]).parse();
    assert!(parsed.flags().is_empty());
    assert_eq!(parsed.parameter_count(), 0);
    assert_eq!(parsed.diagnostics().len(), 1);
    assert_eq!(parsed.diagnostics()[0].kind(), DiagnosticKind::LongFlagNotFound);
}

#[test]
fn writer_sink_renders_one_line_per_diagnostic() {
    let mut sink = WriterSink::new(Vec::new());
    let _ = InputRegistry::new(["prog", "-x", "-vq", "-", "--a=1", "-b=2", "--c"])
        .add_flag("v")
        .parse_with_sink(&mut sink);

    let output = String::from_utf8(sink.into_inner()).unwrap();
    assert_eq!(
        output.lines().collect::<Vec<_>>(),
        vec![
            "Flag not found: x",
            "Flag not found: q (in combined flags -vq)",
            "Unknown short option type: -",
            "Long option not found: a",
            "Short option not found: b",
            "Long flag not found: c",
        ]
    );
}

// ---------------------------------------------------------------------------
// Lazy facade and registration files
// ---------------------------------------------------------------------------

#[test]
fn lazy_input_matches_explicit_parse() {
    let argv = ["prog", "makecoffee", "-vf", "--color=red", "-z"];
    let mut lazy = CommandLineInput::new(argv).with_sink(());
    lazy.add_flag("v").add_flag("f").add_option("color");

    let explicit = InputRegistry::new(argv)
        .add_flags(["v", "f"])
        .add_option("color")
        .parse();

    assert_eq!(lazy.parsed(), &explicit);
    assert_eq!(lazy.parsed(), &explicit);
}

#[test]
fn registry_spec_file_drives_parse() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("coffee.json");
    std::fs::write(&path, r#"{"flags": ["v"], "options": ["sugars"]}"#).unwrap();

    let spec = RegistrySpec::load(&path).unwrap();
    let parsed = spec.registry(["prog", "-v", "--sugars=3"]).parse();
    assert!(parsed.flag_value("v", false));
    assert_eq!(parsed.option_str("sugars"), Some("3"));
}
