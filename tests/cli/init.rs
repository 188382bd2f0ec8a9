use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::{CliTest, RESOURCE_PATH};

#[test]
fn test_init_creates_config_and_resource() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.init_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .arbxrc.json
    ✓ Created lib/l10n/intl_en.arb

    ----- stderr -----
    ");
    insta::assert_snapshot!(test.read_file(".arbxrc.json")?, @r#"
    {
      "resourcePath": "lib/l10n/intl_en.arb",
      "lookupPrefix": "S.current",
      "codegenCommand": [],
      "marker": ".i18n",
      "includes": [
        "lib"
      ],
      "ignores": [],
      "extensions": [
        "dart"
      ]
    }
    "#);
    assert_eq!(test.read_file(RESOURCE_PATH)?, "{}\n");

    Ok(())
}

#[test]
fn test_init_keeps_existing_resource() -> Result<()> {
    let test = CliTest::with_resource(r#"{"save": "Save"}"#)?;

    assert_cmd_snapshot!(test.init_command(), @r"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .arbxrc.json

    ----- stderr -----
    ");
    assert_eq!(test.read_file(RESOURCE_PATH)?, r#"{"save": "Save"}"#);

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file(".arbxrc.json", "{}")?;

    assert_cmd_snapshot!(test.init_command(), @r"
    success: false
    exit_code: 1
    ----- stdout -----

    ----- stderr -----
    Error: .arbxrc.json already exists
    ");
    assert_eq!(test.read_file(".arbxrc.json")?, "{}");

    Ok(())
}
