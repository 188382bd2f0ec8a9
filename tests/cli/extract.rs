use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, RESOURCE_PATH, system_path};

#[test]
fn test_extract_with_key_and_context() -> Result<()> {
    let test = CliTest::with_resource("{}")?;

    assert_cmd_snapshot!(
        test.extract_command("\"Save\"")
            .args(["--key", "save", "--context", "homePage"]),
        @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Added "homePageSave" to lib/l10n/intl_en.arb
      = replace with: S.current.homePageSave

    ----- stderr -----
    "#
    );
    assert_eq!(test.read_resource()?, json!({"homePageSave": "Save"}));

    Ok(())
}

#[test]
fn test_extract_parameterized_writes_metadata() -> Result<()> {
    let test = CliTest::with_resource("{}")?;

    assert_cmd_snapshot!(
        test.extract_command("'Hello $name, you owe ${amount} dollars'"),
        @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Added "helloNameYouOweAmountDollars" to lib/l10n/intl_en.arb
      = replace with: S.current.helloNameYouOweAmountDollars(name, amount)

    ----- stderr -----
    "#
    );
    assert_eq!(
        test.read_resource()?,
        json!({
            "helloNameYouOweAmountDollars": "Hello name, you owe {amount} dollars",
            "@helloNameYouOweAmountDollars": {
                "placeholders": {"name": {}, "amount": {}}
            }
        })
    );

    Ok(())
}

#[test]
fn test_extract_escaped_sigils() -> Result<()> {
    let test = CliTest::with_resource("{}")?;

    assert_cmd_snapshot!(
        test.extract_command(r"'Hello $name, you owe \${amount} dollars'"),
        @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Added "helloNameYouOweAmountDollars" to lib/l10n/intl_en.arb
      = replace with: S.current.helloNameYouOweAmountDollars(name, amount)

    ----- stderr -----
    "#
    );
    assert_cmd_snapshot!(test.extract_command(r"'Costs \$5'"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Added "costs" to lib/l10n/intl_en.arb
      = replace with: S.current.costs

    ----- stderr -----
    "#);
    assert_eq!(
        test.read_resource()?,
        json!({
            "helloNameYouOweAmountDollars": "Hello name, you owe {amount} dollars",
            "@helloNameYouOweAmountDollars": {
                "placeholders": {"name": {}, "amount": {}}
            },
            "costs": "Costs $5"
        })
    );

    Ok(())
}

#[test]
fn test_extract_keeps_existing_entries_in_order() -> Result<()> {
    let test = CliTest::with_resource(r#"{"zeta": "Zeta", "alpha": "Alpha"}"#)?;

    assert_cmd_snapshot!(test.extract_command("Sign in"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Added "signIn" to lib/l10n/intl_en.arb
      = replace with: S.current.signIn

    ----- stderr -----
    "#);
    assert_eq!(
        test.read_file(RESOURCE_PATH)?,
        "{\n  \"zeta\": \"Zeta\",\n  \"alpha\": \"Alpha\",\n  \"signIn\": \"Sign in\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_extract_duplicate_value_reuses_key() -> Result<()> {
    let test = CliTest::with_resource(r#"{"greeting": "Hello World"}"#)?;

    assert_cmd_snapshot!(test.extract_command("'hello world'"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Reused "greeting"
      = note: "hello world" already exists as 'greeting'
      = replace with: S.current.greeting

    ----- stderr -----
    "#);
    assert_eq!(test.read_resource()?, json!({"greeting": "Hello World"}));

    Ok(())
}

#[test]
fn test_extract_json_output() -> Result<()> {
    let test = CliTest::with_resource("{}")?;

    assert_cmd_snapshot!(
        test.extract_command("Total: ${sum}")
            .args(["--json", "--lookup-prefix", "L10n.of(context)"]),
        @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    {
      "key": "totalSum",
      "replacementText": "L10n.of(context).totalSum(sum)",
      "arguments": [
        "sum"
      ],
      "outcome": "inserted",
      "codegen": {
        "status": "skipped"
      }
    }

    ----- stderr -----
    "#
    );

    Ok(())
}

#[test]
fn test_extract_reserved_key_fails() -> Result<()> {
    let test = CliTest::with_resource("{}")?;

    assert_cmd_snapshot!(test.extract_command("Save").args(["--key", "@save"]), @r#"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    error: Key '@save' is reserved: keys starting with '@' hold placeholder metadata
    "#);
    assert_eq!(test.read_resource()?, json!({}));

    Ok(())
}

#[test]
fn test_extract_malformed_interpolation_fails() -> Result<()> {
    let test = CliTest::with_resource("{}")?;

    assert_cmd_snapshot!(test.extract_command("Costs $5").arg("--json"), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    {"error":"No placeholders found in 'Costs $5' although it contains '$'"}

    ----- stderr -----
    "#);
    assert_eq!(test.read_resource()?, json!({}));

    Ok(())
}

#[test]
fn test_extract_missing_resource_is_error() -> Result<()> {
    let test = CliTest::new()?;

    test.snapshot_settings().bind(|| {
        assert_cmd_snapshot!(test.extract_command("Save"), @r"
        success: false
        exit_code: 2
        ----- stdout -----

        ----- stderr -----
        Error: Failed to read resource file [TEMP_DIR]/lib/l10n/intl_en.arb: No such file or directory (os error 2)
        ");
    });

    Ok(())
}

#[test]
fn test_extract_uses_config_resource_path() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(
        ".arbxrc.json",
        r#"{ "resourcePath": "i18n/app_en.arb", "lookupPrefix": "AppLocalizations.of(context)!" }"#,
    )?;
    test.write_file("i18n/app_en.arb", "{}")?;

    assert_cmd_snapshot!(test.extract_command("Log out"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Added "logOut" to i18n/app_en.arb
      = replace with: AppLocalizations.of(context)!.logOut

    ----- stderr -----
    "#);
    assert_eq!(
        test.read_file("i18n/app_en.arb")?,
        "{\n  \"logOut\": \"Log out\"\n}\n"
    );

    Ok(())
}

#[test]
fn test_extract_resource_flag_overrides_config() -> Result<()> {
    let test = CliTest::with_resource("{}")?;
    test.write_file("other.arb", "{}")?;

    assert_cmd_snapshot!(test.extract_command("Save").args(["--resource", "other.arb"]), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Added "save" to other.arb
      = replace with: S.current.save

    ----- stderr -----
    "#);
    assert_eq!(test.read_resource()?, json!({}));
    assert_eq!(test.read_file("other.arb")?, "{\n  \"save\": \"Save\"\n}\n");

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_extract_runs_codegen_after_write() -> Result<()> {
    let test = CliTest::with_resource("{}")?;
    test.write_file(
        ".arbxrc.json",
        r#"{ "codegenCommand": ["sh", "-c", "echo generated > codegen.log"] }"#,
    )?;

    assert_cmd_snapshot!(test.extract_command("Save").env("PATH", system_path()), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Added "save" to lib/l10n/intl_en.arb
      = replace with: S.current.save

    ----- stderr -----
    "#);
    assert_eq!(test.read_file("codegen.log")?, "generated\n");

    // Nothing is written on a duplicate, so code generation does not run again.
    std::fs::remove_file(test.root().join("codegen.log"))?;
    assert_cmd_snapshot!(test.extract_command("Save").env("PATH", system_path()), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Reused "save"
      = note: Key 'save' already exists, reusing it
      = replace with: S.current.save

    ----- stderr -----
    "#);
    assert!(!test.root().join("codegen.log").exists());

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_extract_codegen_failure_keeps_entry() -> Result<()> {
    let test = CliTest::with_resource("{}")?;
    test.write_file(
        ".arbxrc.json",
        r#"{ "codegenCommand": ["sh", "-c", "echo broken >&2; exit 3"] }"#,
    )?;

    assert_cmd_snapshot!(test.extract_command("Save").env("PATH", system_path()), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    ✓ Added "save" to lib/l10n/intl_en.arb
      = replace with: S.current.save

    ----- stderr -----
    warning: code generation failed, generated accessors may be stale: 'sh -c echo broken >&2; exit 3' exited with exit status: 3: broken
    "#);
    assert_eq!(test.read_resource()?, json!({"save": "Save"}));

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_extract_no_codegen_flag() -> Result<()> {
    let test = CliTest::with_resource("{}")?;
    test.write_file(
        ".arbxrc.json",
        r#"{ "codegenCommand": ["sh", "-c", "exit 3"] }"#,
    )?;

    assert_cmd_snapshot!(
        test.extract_command("Save")
            .arg("--no-codegen")
            .env("PATH", system_path()),
        @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Added "save" to lib/l10n/intl_en.arb
      = replace with: S.current.save

    ----- stderr -----
    "#
    );

    Ok(())
}
