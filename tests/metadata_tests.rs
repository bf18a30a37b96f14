use kodegen_bundler_msi::metadata::load_manifest;
use std::path::Path;

#[test]
fn test_fixture_manifest_configures_wix() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/Cargo.toml");
    let manifest = load_manifest(&path).unwrap();

    assert_eq!(manifest.metadata.name, "mock-app");
    assert_eq!(manifest.binary_name, "mock-app");
    assert_eq!(manifest.metadata.version, "0.1.0");

    let wix = &manifest.bundle_settings.windows.wix;
    assert_eq!(wix.candle_flags, ["-ext", "WixUIExtension"]);
    assert_eq!(
        wix.light_flags,
        ["-ext", "WixUIExtension", "-cultures:en-us"]
    );
    assert_eq!(
        wix.artifact_name.as_deref(),
        Some("${name}-${version}-${arch}.${ext}")
    );
}
