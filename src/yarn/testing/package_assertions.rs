//! Fluent assertions over derived package records

use super::matchers::TextMatch;
use crate::yarn::package::Package;

pub fn assert_package(package: &Package) -> PackageAssertion<'_> {
    PackageAssertion { package }
}

pub struct PackageAssertion<'a> {
    package: &'a Package,
}

impl<'a> PackageAssertion<'a> {
    fn context(&self, field: &str) -> String {
        format!("package {}: {}", self.package.name(), field)
    }

    pub fn name(self, expected: &str) -> Self {
        assert_eq!(self.package.name(), expected, "package name");
        self
    }

    pub fn version(self, expected: &str) -> Self {
        assert_eq!(self.package.version(), expected, "{}", self.context("version"));
        self
    }

    pub fn url(self, expected: Option<&str>) -> Self {
        assert_eq!(self.package.url(), expected, "{}", self.context("url"));
        self
    }

    pub fn url_matches(self, expected: TextMatch) -> Self {
        let context = self.context("url");
        match self.package.url() {
            Some(url) => expected.assert(url, &context),
            None => panic!("{}: expected a url, found none", context),
        }
        self
    }

    pub fn checksum(self, expected: Option<&str>) -> Self {
        assert_eq!(self.package.checksum(), expected, "{}", self.context("checksum"));
        self
    }

    pub fn checksum_matches(self, expected: TextMatch) -> Self {
        let context = self.context("checksum");
        match self.package.checksum() {
            Some(checksum) => expected.assert(checksum, &context),
            None => panic!("{}: expected a checksum, found none", context),
        }
        self
    }

    pub fn path(self, expected: Option<&str>) -> Self {
        assert_eq!(self.package.path(), expected, "{}", self.context("path"));
        self
    }

    pub fn alias(self, expected: Option<&str>) -> Self {
        assert_eq!(self.package.alias(), expected, "{}", self.context("alias"));
        self
    }

    pub fn dependency_count(self, expected: usize) -> Self {
        assert_eq!(
            self.package.dependencies().len(),
            expected,
            "{}",
            self.context("dependency count")
        );
        self
    }

    pub fn has_dependency(self, name: &str, range: &str) -> Self {
        let found = self
            .package
            .dependencies()
            .get(name)
            .and_then(|value| value.as_str());
        assert_eq!(found, Some(range), "{}", self.context(name));
        self
    }
}
