//! Lockfile model: loading, versioning, package derivation and canonical output

use rstest::rstest;
use std::path::{Path, PathBuf};
use yarn_lockfile::yarn::lexing::TokenKind;
use yarn_lockfile::yarn::loader::LockfileLoader;
use yarn_lockfile::yarn::testing::{assert_package, TextMatch};
use yarn_lockfile::{mapping, Lockfile, Mapping, ValidationError, Version};

fn data_path(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("data")
        .join(name)
}

fn data_files() -> Vec<PathBuf> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(data_path(""))
        .expect("tests/data exists")
        .map(|entry| entry.expect("readable entry").path())
        .filter(|path| path.is_file())
        .collect();
    files.sort();
    files
}

fn data_to_dump() -> Mapping {
    mapping! {
        "foo@^1.0.0" => mapping! {
            "version" => "1.0.0",
            "resolved" => "https://registry.yarnpkg.com/foo/-/foo-1.0.0.tgz",
            "dependencies" => mapping! { "bar" => "^2.0.0" },
            "some number" => 1u64,
        },
        "bar@^2.0.0" => mapping! {
            "version" => "2.0.0",
            "resolved" => "https://registry.yarnpkg.com/bar/-/bar-2.0.0.tgz",
            "some boolean" => true,
        },
        "baz@https://example.org/baz.tar.gz" => mapping! {
            "version" => "3.0.0",
            "resolved" => "https://example.org/baz.tar.gz",
        },
        "spam@^4.0.0, spam@^4.0.1" => mapping! { "version" => "4.0.0" },
        "eggs@file:some_file, eggs@file:other_file" => mapping! { "version" => "5.0.0" },
    }
}

const EXPECTED_CONTENT: &str = r#"# yarn lockfile v1

foo@^1.0.0:
  version "1.0.0"
  resolved "https://registry.yarnpkg.com/foo/-/foo-1.0.0.tgz"
  dependencies:
    bar "^2.0.0"
  "some number" 1

bar@^2.0.0:
  version "2.0.0"
  resolved "https://registry.yarnpkg.com/bar/-/bar-2.0.0.tgz"
  "some boolean" true

"baz@https://example.org/baz.tar.gz":
  version "3.0.0"
  resolved "https://example.org/baz.tar.gz"

spam@^4.0.0, spam@^4.0.1:
  version "4.0.0"

"eggs@file:some_file", "eggs@file:other_file":
  version "5.0.0"
"#;

#[rstest]
#[case("# comment\n", mapping! {})]
#[case(r#"foo "bar""#, mapping! { "foo" => "bar" })]
#[case("foo \"bar\"\n# comment\n", mapping! { "foo" => "bar" })]
#[case("foo \"bar\"\n# comment", mapping! { "foo" => "bar" })]
fn test_from_str(#[case] source: &str, #[case] expected: Mapping) {
    let lock: Lockfile = source.parse().unwrap();
    assert_eq!(lock.data(), &expected);
}

#[test]
fn test_from_file() {
    let lock = Lockfile::from_path(data_path("single.lock")).unwrap();
    assert_eq!(lock.version(), Version::V1);
    assert_eq!(
        lock.data(),
        &mapping! {
            "abab@^2.0.0" => mapping! {
                "version" => "2.0.0",
                "resolved" => "https://registry.yarnpkg.com/abab/-/abab-2.0.0.tgz#aba0ab4c5eee2d4c79d3487d85450fb2376ebb0f",
                "integrity" => "sha512-sY5AXXVZv4Y1VACTtR11UJCPHHudgY5i26Qj5TypE6DKlIApbwb5uqhXcJ5UUGbvZNRh7EeIoW+LrJumBsKp7w==",
            }
        }
    );
}

#[rstest]
#[case("# comment\n")]
#[case(r#"foo "bar""#)]
#[case("foo \"bar\"\n# comment\n")]
fn test_unknown_version(#[case] source: &str) {
    assert_eq!(Lockfile::parse(source).unwrap().version(), Version::Unknown);
}

#[test]
fn test_invalid_version() {
    let err = Lockfile::new("2", Mapping::new()).unwrap_err();
    assert_eq!(
        err,
        ValidationError::UnsupportedVersion {
            version: "2".to_string()
        }
    );
    assert_eq!(err.to_string(), "Unsupported yarn.lockfile version: 2");
}

#[test]
fn test_packages() {
    let lock = Lockfile::parse("breakfast@^1.1.1:\n  eggs bacon\n  version \"2.0.0\"").unwrap();
    let packages = lock.packages().unwrap();
    assert_eq!(packages.len(), 1);
    assert_package(&packages[0])
        .name("breakfast")
        .version("2.0.0")
        .checksum(None)
        .url(None)
        .path(None);
}

#[test]
fn test_packages_no_version() {
    let lock = Lockfile::parse("breakfast@^1.1.1:\n  eggs bacon").unwrap();
    let err = lock.packages().unwrap_err();
    assert!(err.to_string().starts_with("Package version was not provided"));
}

#[test]
fn test_packages_url_and_checksum() {
    let url = "https://example.com/breakfast/1.1.1.tar.gz";
    let source = format!(
        "breakfast@^1.1.1:\n  version \"2.0.0\"\n  resolved \"{url}\"\n  integrity someHash"
    );
    let packages = Lockfile::parse(&source).unwrap().packages().unwrap();
    assert_package(&packages[0])
        .name("breakfast")
        .version("2.0.0")
        .url(Some(url))
        .checksum(Some("someHash"))
        .path(None);
}

#[test]
fn test_relpath() {
    let lock = Lockfile::parse("\"breakfast@file:some/relative/path\":\n  version \"0.0.0\"").unwrap();
    let packages = lock.packages().unwrap();
    assert_package(&packages[0])
        .name("breakfast")
        .version("0.0.0")
        .url(None)
        .checksum(None)
        .path(Some("some/relative/path"));
    assert_eq!(packages[0].relpath(), Some("some/relative/path"));
}

#[test]
fn test_package_with_comma() {
    let lock = Lockfile::parse("eggs@^1.1.1, eggs@^1.1.2, eggs@^1.1.3:\n  version \"1.1.7\"").unwrap();
    let packages = lock.packages().unwrap();
    assert_eq!(packages.len(), 1);
    assert_package(&packages[0])
        .name("eggs")
        .version("1.1.7")
        .url(None)
        .checksum(None)
        .path(None);
}

#[test]
fn test_fixture_packages() {
    let lock = Lockfile::from_path(data_path("scoped.lock")).unwrap();
    let packages = lock.packages().unwrap();
    assert_eq!(packages.len(), 7);

    assert_package(&packages[0])
        .name("@babel/code-frame")
        .version("7.10.4")
        .url_matches(TextMatch::StartsWith(
            "https://registry.yarnpkg.com/@babel/code-frame/".into(),
        ))
        .checksum_matches(TextMatch::StartsWith("sha512-".into()))
        .dependency_count(1)
        .has_dependency("@babel/highlight", "^7.10.4");

    assert_package(&packages[1])
        .name("@babel/highlight")
        .dependency_count(3)
        .has_dependency("chalk", "^2.0.0");

    assert_package(&packages[4]).name("js-tokens").version("4.0.0");

    assert_package(&packages[5])
        .name("string-width")
        .alias(Some("string-width-cjs"))
        .version("4.2.3")
        .dependency_count(0);

    assert_package(&packages[6])
        .name("local-utils")
        .path(Some("./packages/utils"))
        .url(None);
}

#[test]
fn test_to_str() {
    let lock = Lockfile::new("1", data_to_dump()).unwrap();
    assert_eq!(lock.to_lockfile_string(), EXPECTED_CONTENT);
    assert_eq!(lock.to_string(), EXPECTED_CONTENT);
}

#[test]
fn test_to_file() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("yarn.lock");
    Lockfile::new("1", data_to_dump()).unwrap().to_path(&output).unwrap();
    assert_eq!(std::fs::read_to_string(&output).unwrap(), EXPECTED_CONTENT);
}

#[test]
fn test_dump_parses_back() {
    let lock = Lockfile::parse(EXPECTED_CONTENT).unwrap();
    assert_eq!(lock.version(), Version::V1);
    assert_eq!(lock.data(), &data_to_dump());
}

#[test]
fn test_roundtrip_fixtures() {
    let dir = tempfile::tempdir().unwrap();
    let files = data_files();
    assert!(!files.is_empty());

    for file in files {
        let out = dir.path().join(file.file_name().expect("file name"));
        let original = LockfileLoader::from_path(&file).unwrap().lockfile().unwrap();
        original.to_path(&out).unwrap();
        let generated = LockfileLoader::from_path(&out).unwrap().lockfile().unwrap();
        assert_eq!(original.data(), generated.data(), "{}", file.display());
    }
}

#[test]
fn test_loader_stages() {
    let loader = LockfileLoader::from_path(data_path("single.lock")).unwrap();
    let tokens = loader.tokenize().unwrap();
    assert_eq!(
        tokens.iter().filter(|t| t.kind == TokenKind::Newline).count(),
        loader.source().lines().filter(|line| !line.trim().is_empty()).count()
    );
    assert_eq!(loader.parse().unwrap().data.len(), 1);
    assert_eq!(loader.lockfile().unwrap().version(), Version::V1);
}

#[test]
fn test_to_json() {
    let lock = Lockfile::parse("foo:\n  version \"1.0.0\"\n  answer 42\nbar \"baz\"\n").unwrap();
    insta::assert_snapshot!(lock.to_json().unwrap(), @r###"
{
    "bar": "baz",
    "foo": {
        "answer": 42,
        "version": "1.0.0"
    }
}
"###);
}

#[test]
fn test_to_yaml_keeps_order() {
    let lock = Lockfile::parse("foo \"1\"\nbar 2\n").unwrap();
    assert_eq!(lock.to_yaml().unwrap(), "foo: '1'\nbar: 2\n");
}
