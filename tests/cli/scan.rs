use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::{CliTest, system_path};

const HOME_PAGE: &str = r#"import 'package:flutter/material.dart';

class HomePage extends StatelessWidget {
  Widget build(BuildContext context) {
    return Column(children: [
      Text('Sign in'.i18n),
      Text("Hello ${user.name}".i18n),
      Text('Not tagged'),
    ]);
  }
}
"#;

#[test]
fn test_scan_dry_run_lists_candidates() -> Result<()> {
    let test = CliTest::with_resource("{}")?;
    test.write_file("lib/home_page.dart", HOME_PAGE)?;

    assert_cmd_snapshot!(test.scan_command(), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    candidate: 'Sign in'  tagged-string
      --> lib/home_page.dart:6:12
      |
    6 |       Text('Sign in'.i18n),
      |            ^

    candidate: "Hello ${user.name}"  tagged-string
      --> lib/home_page.dart:7:12
      |
    7 |       Text("Hello ${user.name}".i18n),
      |            ^

    Would extract 2 strings in 1 file.
    Run with --apply to extract them.

    ----- stderr -----
    "#);

    // Dry-run leaves everything untouched.
    assert_eq!(test.read_resource()?, json!({}));
    assert_eq!(test.read_file("lib/home_page.dart")?, HOME_PAGE);

    Ok(())
}

#[test]
fn test_scan_apply_extracts_and_rewrites() -> Result<()> {
    let test = CliTest::with_resource("{}")?;
    test.write_file("lib/home_page.dart", HOME_PAGE)?;

    assert_cmd_snapshot!(test.scan_command().arg("--apply"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Extracted 2 strings in 1 file.
      - new keys: 2

    ----- stderr -----
    ");
    assert_eq!(
        test.read_resource()?,
        json!({
            "signIn": "Sign in",
            "helloUsername": "Hello {username}",
            "@helloUsername": {"placeholders": {"username": {}}}
        })
    );

    let source = test.read_file("lib/home_page.dart")?;
    assert!(source.contains("Text(S.current.signIn),"));
    assert!(source.contains("Text(S.current.helloUsername(user.name)),"));
    assert!(source.contains("Text('Not tagged'),"));

    // A second run finds nothing left to do.
    assert_cmd_snapshot!(test.scan_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Scanned 1 source file - no tagged strings found

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_scan_apply_reuses_existing_values() -> Result<()> {
    let test = CliTest::with_resource(r#"{"login": "Sign in"}"#)?;
    test.write_file("lib/a.dart", "final a = 'Sign in'.i18n;\n")?;
    test.write_file("lib/b.dart", "final b = \"sign in\".i18n;\n")?;

    assert_cmd_snapshot!(test.scan_command().arg("--apply"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Extracted 2 strings in 2 files.
      - new keys: 0
      - reused keys: 2

    ----- stderr -----
    ");
    assert_eq!(test.read_resource()?, json!({"login": "Sign in"}));
    assert_eq!(test.read_file("lib/a.dart")?, "final a = S.current.login;\n");
    assert_eq!(test.read_file("lib/b.dart")?, "final b = S.current.login;\n");

    Ok(())
}

#[test]
fn test_scan_apply_skips_rejected_strings() -> Result<()> {
    let test = CliTest::with_resource("{}")?;
    test.write_file(
        "lib/price.dart",
        "final a = 'Costs $5'.i18n;\nfinal b = 'Buy now'.i18n;\nfinal c = 'Costs \\$5'.i18n;\n",
    )?;

    assert_cmd_snapshot!(test.scan_command().arg("--apply"), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    skipped: No placeholders found in 'Costs $5' although it contains '$'  rejected-string
      --> lib/price.dart:1:11

    Extracted 2 strings in 1 file.
      - new keys: 2
    ✘ 1 string could not be extracted

    ----- stderr -----
    ");
    assert_eq!(
        test.read_resource()?,
        json!({"buyNow": "Buy now", "costs": "Costs $5"})
    );
    assert_eq!(
        test.read_file("lib/price.dart")?,
        "final a = 'Costs $5'.i18n;\nfinal b = S.current.buyNow;\nfinal c = S.current.costs;\n"
    );

    Ok(())
}

#[test]
fn test_scan_apply_raw_strings() -> Result<()> {
    let test = CliTest::with_resource("{}")?;
    test.write_file(
        "lib/raw.dart",
        "Text(r'Save'.i18n);\nText(r'Pay $5'.i18n);\nText('''Long\ntext'''.i18n);\n",
    )?;

    assert_cmd_snapshot!(test.scan_command().arg("--apply"), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Extracted 1 string in 1 file.
      - new keys: 1

    ----- stderr -----
    ");
    assert_eq!(test.read_resource()?, json!({"save": "Save"}));
    assert_eq!(
        test.read_file("lib/raw.dart")?,
        "Text(S.current.save);\nText(r'Pay $5'.i18n);\nText('''Long\ntext'''.i18n);\n"
    );

    Ok(())
}

#[test]
fn test_scan_respects_config() -> Result<()> {
    let test = CliTest::with_resource("{}")?;
    test.write_file(
        ".arbxrc.json",
        r#"{
            "marker": ".tr",
            "includes": ["lib"],
            "ignores": ["**/generated/**"]
        }"#,
    )?;
    test.write_file("lib/a.dart", "final a = 'Save'.tr;\nfinal b = 'Skip'.i18n;\n")?;
    test.write_file("lib/generated/l10n.dart", "final c = 'Ignored'.tr;\n")?;
    test.write_file("test/a_test.dart", "final d = 'Outside'.tr;\n")?;

    assert_cmd_snapshot!(test.scan_command(), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    candidate: 'Save'  tagged-string
      --> lib/a.dart:1:11
      |
    1 | final a = 'Save'.tr;
      |           ^

    Would extract 1 string in 1 file.
    Run with --apply to extract them.

    ----- stderr -----
    ");

    Ok(())
}

#[test]
fn test_scan_marker_flag_overrides_config() -> Result<()> {
    let test = CliTest::with_resource("{}")?;
    test.write_file("lib/a.dart", "final a = 'Save'.tr;\n")?;

    assert_cmd_snapshot!(test.scan_command().args(["--marker", ".tr"]), @r"
    success: false
    exit_code: 1
    ----- stdout -----
    candidate: 'Save'  tagged-string
      --> lib/a.dart:1:11
      |
    1 | final a = 'Save'.tr;
      |           ^

    Would extract 1 string in 1 file.
    Run with --apply to extract them.

    ----- stderr -----
    ");

    Ok(())
}

#[cfg(unix)]
#[test]
fn test_scan_apply_runs_codegen_once() -> Result<()> {
    let test = CliTest::with_resource("{}")?;
    test.write_file(
        ".arbxrc.json",
        r#"{ "codegenCommand": ["sh", "-c", "echo run >> codegen.log"] }"#,
    )?;
    test.write_file("lib/a.dart", "final a = 'One'.i18n;\nfinal b = 'Two'.i18n;\n")?;

    assert_cmd_snapshot!(test.scan_command().arg("--apply").env("PATH", system_path()), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    Extracted 2 strings in 1 file.
      - new keys: 2

    ----- stderr -----
    ");
    assert_eq!(test.read_file("codegen.log")?, "run\n");

    Ok(())
}
