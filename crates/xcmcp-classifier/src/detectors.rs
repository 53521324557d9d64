//! Pattern families for each detector.
//!
//! Detectors run against ANSI-stripped text. Each one either produces a single
//! `BuildError` or declines; they never accumulate.

use regex_lite::{Captures, Regex};

use crate::config::DetectorKind;
use crate::result::{BuildError, BuildErrorKind};
use crate::text::first_quoted;

/// Build commands listed under "The following build commands failed:" that are compile steps.
const COMPILE_STEPS: &[&str] = &[
    "SwiftCompile",
    "CompileSwift",
    "CompileSwiftSources",
    "CompileC",
    "SwiftEmitModule",
];

/// Maximum number of failed-command lines kept as details.
const MAX_FAILED_COMMANDS: usize = 3;

const SUGGEST_SCHEME: &str =
    "Run `xcodebuild -list` to see available schemes and make sure the scheme is shared.";
const SUGGEST_SIGNING: &str = "Select a valid team and signing certificate in Signing & Capabilities, \
     or build for the simulator with CODE_SIGNING_ALLOWED=NO.";
const SUGGEST_PROVISIONING: &str = "Regenerate or download the provisioning profile for this bundle \
     identifier, or pass -allowProvisioningUpdates.";
const SUGGEST_CAPABILITY: &str = "Enable the capability for the App ID in the developer portal and \
     regenerate the provisioning profile, or remove the entitlement.";
const SUGGEST_MODULE: &str = "Add the package or framework that provides the module to the target's \
     dependencies, then resolve packages.";
const SUGGEST_FETCH: &str = "Verify the repository URL is correct and reachable, then resolve \
     package dependencies again.";
const SUGGEST_SYMBOL: &str =
    "Check imports and that the declaring module is a dependency of this target.";
const SUGGEST_CONFIGURATION: &str =
    "Use a configuration defined by the project, usually Debug or Release.";
const SUGGEST_DESTINATION: &str = "Run `xcodebuild -showdestinations -scheme <scheme>` and pass one \
     of the listed destinations.";
const SUGGEST_SDK: &str =
    "Install the platform in Xcode > Settings > Components or pass an installed SDK with -sdk.";
const SUGGEST_PRODUCT: &str =
    "Check the product name against the dependency's Package.swift `products` list.";
const SUGGEST_TARGET: &str = "Check the target name; `xcodebuild -list` or `swift package describe` \
     lists the available targets.";
const SUGGEST_MANIFEST: &str =
    "Fix the errors in Package.swift; `swift package describe` reports manifest problems.";
const SUGGEST_PROJECT: &str = "Check the -project or -workspace path; it must point to an existing \
     .xcodeproj or .xcworkspace.";
const SUGGEST_TOOL_ERROR: &str = "Review the surrounding build log for the failing step.";
const SUGGEST_COMPILE: &str = "Fix the compiler errors reported for the listed files.";
const SUGGEST_FAILED_COMMANDS: &str = "Inspect the log of the failed build commands listed above.";

fn re(pattern: &str) -> Regex {
    Regex::new(pattern).expect("built-in classifier pattern must compile")
}

/// Compiled patterns for every detector.
pub(crate) struct Patterns {
    scheme_line: Regex,
    scheme_name: Regex,
    signing: Regex,
    provisioning: Regex,
    profile_name: Regex,
    capability: Regex,
    no_such_module: Regex,
    fetch_failure: Regex,
    repo_url: Regex,
    unresolved_symbol: Regex,
    configuration: Regex,
    configuration_name: Regex,
    destination: Regex,
    platform_name: Regex,
    sdk: Regex,
    product: Regex,
    target: Regex,
    manifest: Regex,
    project_missing: Regex,
    url_loading: Regex,
    tool_error: Regex,
    failed_commands: Regex,
}

impl Patterns {
    pub(crate) fn new() -> Self {
        Self {
            scheme_line: re(r"(?im)^[^\n]*\berror\b[^\n]*\bscheme\b[^\n]*$"),
            scheme_name: re(r#"(?i)\bscheme (?:named )?["“'‘]([^"”'’\n]+)["”'’]"#),
            signing: re(
                r"(?i)code ?sign(?:ing)? error|no signing certificates?\b|no code signing identit(?:y|ies) found",
            ),
            provisioning: re(
                r#"(?i)provisioning profiles?[^\n]*(?:not found|required|could not be found|doesn['’]t|does not|expired)|requires a provisioning profile|no profiles? for ["“'‘][^\n]*were found|(?:doesn['’]t|does not) (?:support|include) the [^\n]+? capabilit"#,
            ),
            profile_name: re(r#"(?i)provisioning profile (?:named )?["“‘]([^"”’\n]+)["”’]"#),
            capability: re(r"(?i)(?:doesn['’]t|does not) (?:support|include) the ([^\n]+?) capabilit"),
            no_such_module: re(r#"(?i)no such module ["“'‘]([^"”'’\n]+)["”'’]"#),
            fetch_failure: re(
                r"(?i)failed to clone repository|could not fetch dependency|could not resolve package dependencies|failed to resolve dependencies",
            ),
            repo_url: re(r#"(?i)((?:https?|ssh|git)://[^\s'"”’]+|git@[^\s'"”’]+)"#),
            unresolved_symbol: re(r"(?i)cannot find [^\n]+ in scope|unresolved identifier"),
            configuration: re(
                r"(?i)\bconfiguration\b[^\n]*(?:not found|does not exist|is invalid|is not valid|could not be found)|invalid (?:build )?configuration|(?:does not|doesn['’]t) contain a (?:build )?configuration",
            ),
            configuration_name: re(r#"(?i)configuration (?:named )?["“'‘]([^"”'’\n]+)["”'’]"#),
            destination: re(
                r"(?i)unsupported platform|invalid destination|no destinations?\b|unable to find a destination matching|not a valid destination|supported platforms for the buildables[^\n]*empty",
            ),
            platform_name: re(r#"(?i)platform[^\n"“'‘]*["“'‘]([^"”'’\n]+)["”'’]"#),
            sdk: re(
                r#"(?i)\bsdk ["“'‘]?([^"”'’\s]+?)["”'’]? (?:cannot|could not) be located|(?:unable to find|cannot find|could not find) sdk ["“'‘]?([^"”'’\s]+)"#,
            ),
            product: re(
                r#"(?i)no such product ["“'‘]([^"”'’\n]+)["”'’]|\bproduct ["“'‘]([^"”'’\n]+)["”'’][^\n]*not found"#,
            ),
            target: re(
                r#"(?i)no target named ["“'‘]([^"”'’\n]+)["”'’]|\btarget ["“'‘]([^"”'’\n]+)["”'’] (?:not found|does not exist|could not be found)|(?:does not|doesn['’]t) contain a target named ["“'‘]([^"”'’\n]+)["”'’]"#,
            ),
            manifest: re(
                r"(?i)invalid manifest|manifest parse error|failed to parse (?:the )?(?:package )?manifest|Package\.swift:\d+(?::\d+)?: error|error: manifest",
            ),
            project_missing: re(r"(?i)(?:workspace|\.xcodeproj|\.xcworkspace)[^\n]*does not exist"),
            url_loading: re(r"(?i)nsurlerrordomain|nscocoaerrordomain|cfnetwork|url loading"),
            tool_error: re(r"(?im)^\s*((?:xcodebuild: )?error:[ \t]*([^\n]+))$"),
            failed_commands: re(r"(?i)the following build commands failed:"),
        }
    }

    /// Run one detector against already-cleaned text.
    pub(crate) fn detect(&self, kind: DetectorKind, text: &str) -> Option<BuildError> {
        match kind {
            DetectorKind::Scheme => self.scheme(text),
            DetectorKind::Signing => self.signing(text),
            DetectorKind::Provisioning => self.provisioning(text),
            DetectorKind::Dependency => self.dependency(text),
            DetectorKind::Configuration => self.configuration(text),
            DetectorKind::Destination => self.destination(text),
            DetectorKind::Sdk => self.sdk(text),
            DetectorKind::Product => self.product(text),
            DetectorKind::Target => self.target(text),
            DetectorKind::Manifest => self.manifest(text),
            DetectorKind::ProjectNotFound => self.project_not_found(text),
            DetectorKind::ToolError => self.tool_error(text),
            DetectorKind::FailedCommands => self.failed_commands(text),
        }
    }

    fn scheme(&self, text: &str) -> Option<BuildError> {
        let line = self.scheme_line.find(text)?.as_str();
        let title = match capture(&self.scheme_name, line) {
            Some(name) => format!("Scheme not found: \"{}\"", name),
            None => "Scheme not found".to_string(),
        };
        Some(
            BuildError::new(BuildErrorKind::Scheme, title)
                .with_details(error_message(line))
                .with_suggestion(SUGGEST_SCHEME),
        )
    }

    fn signing(&self, text: &str) -> Option<BuildError> {
        let line = matching_line(&self.signing, text)?;
        let mut err = BuildError::new(BuildErrorKind::Signing, "Code signing failed")
            .with_suggestion(SUGGEST_SIGNING);
        err = match first_quoted(line) {
            Some(identity) => err.with_details(format!("Signing identity: \"{}\"", identity)),
            None => err.with_details(error_message(line)),
        };
        Some(err)
    }

    fn provisioning(&self, text: &str) -> Option<BuildError> {
        let line = matching_line(&self.provisioning, text)?;
        let profile = capture(&self.profile_name, line);

        if let Some(capability) = capture(&self.capability, line) {
            let capability = capability.trim_matches(|c| "\"“”'‘’".contains(c));
            let mut err = BuildError::new(
                BuildErrorKind::Provisioning,
                format!("Provisioning profile missing capability: {}", capability),
            )
            .with_suggestion(SUGGEST_CAPABILITY);
            if let Some(profile) = profile {
                err = err.with_details(format!("Profile: \"{}\"", profile));
            }
            return Some(err);
        }

        let err = BuildError::new(BuildErrorKind::Provisioning, "Provisioning profile issue")
            .with_suggestion(SUGGEST_PROVISIONING);
        Some(match profile {
            Some(profile) => err.with_details(format!("Profile: \"{}\"", profile)),
            None => err.with_details(error_message(line)),
        })
    }

    fn dependency(&self, text: &str) -> Option<BuildError> {
        if let Some(module) = capture(&self.no_such_module, text) {
            return Some(
                BuildError::new(BuildErrorKind::Dependency, format!("Missing module: '{}'", module))
                    .with_details(format!("No such module '{}'", module))
                    .with_suggestion(SUGGEST_MODULE),
            );
        }

        if let Some(line) = matching_line(&self.fetch_failure, text) {
            let err = BuildError::new(BuildErrorKind::Dependency, "Failed to fetch package dependency")
                .with_suggestion(SUGGEST_FETCH);
            return Some(match capture(&self.repo_url, text) {
                Some(url) => {
                    let url = url.trim_end_matches(|c| ".,:;)".contains(c));
                    err.with_details(format!("Repository: {}", url))
                }
                None => err.with_details(error_message(line)),
            });
        }

        let line = matching_line(&self.unresolved_symbol, text)?;
        Some(
            BuildError::new(BuildErrorKind::Dependency, "Unresolved symbol")
                .with_details(error_message(line))
                .with_suggestion(SUGGEST_SYMBOL),
        )
    }

    fn configuration(&self, text: &str) -> Option<BuildError> {
        let line = matching_line(&self.configuration, text)?;
        let title = match capture(&self.configuration_name, line) {
            Some(name) => format!("Configuration not found: \"{}\"", name),
            None => "Invalid build configuration".to_string(),
        };
        Some(
            BuildError::new(BuildErrorKind::Configuration, title)
                .with_details(error_message(line))
                .with_suggestion(SUGGEST_CONFIGURATION),
        )
    }

    fn destination(&self, text: &str) -> Option<BuildError> {
        let m = self.destination.find(text)?;
        let line = enclosing_line(text, m.start(), m.end());
        let unsupported = m.as_str().eq_ignore_ascii_case("unsupported platform");
        let title = match (unsupported, capture(&self.platform_name, line)) {
            (true, Some(platform)) => format!("Unsupported platform: \"{}\"", platform),
            (true, None) => "Unsupported platform".to_string(),
            (false, _) => "Invalid destination".to_string(),
        };
        Some(
            BuildError::new(BuildErrorKind::Destination, title)
                .with_details(error_message(line))
                .with_suggestion(SUGGEST_DESTINATION),
        )
    }

    fn sdk(&self, text: &str) -> Option<BuildError> {
        let caps = self.sdk.captures(text)?;
        let title = match first_group(&caps) {
            Some(sdk) => format!("SDK not found: {}", sdk),
            None => "SDK not found".to_string(),
        };
        let line = whole_match_line(text, &caps);
        Some(
            BuildError::new(BuildErrorKind::Sdk, title)
                .with_details(error_message(line))
                .with_suggestion(SUGGEST_SDK),
        )
    }

    fn product(&self, text: &str) -> Option<BuildError> {
        let caps = self.product.captures(text)?;
        let name = first_group(&caps)?;
        let line = whole_match_line(text, &caps);
        Some(
            BuildError::new(BuildErrorKind::Product, format!("Product not found: '{}'", name))
                .with_details(error_message(line))
                .with_suggestion(SUGGEST_PRODUCT),
        )
    }

    fn target(&self, text: &str) -> Option<BuildError> {
        let caps = self.target.captures(text)?;
        let name = first_group(&caps)?;
        let line = whole_match_line(text, &caps);
        Some(
            BuildError::new(BuildErrorKind::Target, format!("Target not found: '{}'", name))
                .with_details(error_message(line))
                .with_suggestion(SUGGEST_TARGET),
        )
    }

    fn manifest(&self, text: &str) -> Option<BuildError> {
        let line = matching_line(&self.manifest, text)?;
        Some(
            BuildError::new(BuildErrorKind::Manifest, "Invalid package manifest")
                .with_details(error_message(line))
                .with_suggestion(SUGGEST_MANIFEST),
        )
    }

    fn project_not_found(&self, text: &str) -> Option<BuildError> {
        let found = self.project_missing.find_iter(text).any(|m| {
            let line = enclosing_line(text, m.start(), m.end());
            !self.url_loading.is_match(line)
        });
        if !found {
            return None;
        }
        Some(
            BuildError::new(BuildErrorKind::Configuration, "Project or workspace not found")
                .with_suggestion(SUGGEST_PROJECT),
        )
    }

    fn tool_error(&self, text: &str) -> Option<BuildError> {
        let caps = self.tool_error.captures(text)?;
        let whole = caps.get(1)?.as_str();
        let message = caps.get(2)?.as_str().trim();
        let title = if whole.starts_with("xcodebuild:") {
            "xcodebuild error"
        } else {
            "Build error"
        };
        Some(
            BuildError::new(BuildErrorKind::Generic, title)
                .with_details(message)
                .with_suggestion(SUGGEST_TOOL_ERROR),
        )
    }

    fn failed_commands(&self, text: &str) -> Option<BuildError> {
        let m = self.failed_commands.find(text)?;
        let commands: Vec<&str> = text[m.end()..]
            .lines()
            .skip(1)
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .take_while(|l| !l.starts_with('('))
            .take(MAX_FAILED_COMMANDS)
            .collect();

        let compile = commands
            .iter()
            .any(|c| COMPILE_STEPS.iter().any(|step| c.starts_with(step)));

        let err = if compile {
            BuildError::new(BuildErrorKind::Compile, "Compilation failed").with_suggestion(SUGGEST_COMPILE)
        } else {
            BuildError::new(BuildErrorKind::Generic, "Build commands failed")
                .with_suggestion(SUGGEST_FAILED_COMMANDS)
        };
        if commands.is_empty() {
            Some(err)
        } else {
            Some(err.with_details(commands.join("\n")))
        }
    }
}

/// First capture group of `re` in `haystack`.
fn capture<'t>(re: &Regex, haystack: &'t str) -> Option<&'t str> {
    re.captures(haystack)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim())
        .filter(|s| !s.is_empty())
}

/// First participating group among alternations.
fn first_group<'t>(caps: &Captures<'t>) -> Option<&'t str> {
    caps.iter()
        .skip(1)
        .flatten()
        .map(|m| m.as_str())
        .find(|s| !s.is_empty())
}

fn matching_line<'t>(re: &Regex, text: &'t str) -> Option<&'t str> {
    let m = re.find(text)?;
    Some(enclosing_line(text, m.start(), m.end()))
}

fn whole_match_line<'t>(text: &'t str, caps: &Captures<'t>) -> &'t str {
    match caps.get(0) {
        Some(m) => enclosing_line(text, m.start(), m.end()),
        None => "",
    }
}

/// The full line(s) of `text` covering the byte range `start..end`.
fn enclosing_line(text: &str, start: usize, end: usize) -> &str {
    let line_start = text[..start].rfind('\n').map(|i| i + 1).unwrap_or(0);
    let line_end = text[end..].find('\n').map(|i| end + i).unwrap_or(text.len());
    text[line_start..line_end].trim_end_matches('\r')
}

/// The message after the first `error:` marker on `line`, or the trimmed line.
fn error_message(line: &str) -> String {
    let lower = line.to_ascii_lowercase();
    let message = match lower.find("error:") {
        Some(pos) => &line[pos + "error:".len()..],
        None => line,
    };
    message.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detect(kind: DetectorKind, text: &str) -> Option<BuildError> {
        Patterns::new().detect(kind, text)
    }

    #[test]
    fn test_scheme_extracts_name() {
        let text = r#"xcodebuild: error: The workspace named "App" does not contain a scheme named "Missing". The "-list" option can be used to find the names of the schemes in the workspace."#;
        let err = detect(DetectorKind::Scheme, text).unwrap();
        assert_eq!(err.kind, BuildErrorKind::Scheme);
        assert_eq!(err.title, "Scheme not found: \"Missing\"");
    }

    #[test]
    fn test_scheme_requires_error_marker() {
        assert!(detect(DetectorKind::Scheme, "Using scheme App for build").is_none());
    }

    #[test]
    fn test_scheme_and_error_must_share_a_line() {
        let text = "note: Using scheme App\nerror: Build input file cannot be found: '/p/App/Missing.swift'";
        assert!(detect(DetectorKind::Scheme, text).is_none());
    }

    #[test]
    fn test_signing_identity() {
        let text = r#"error: No signing certificate "iOS Development" found: No "iOS Development" signing certificate matching team ID "ABCDE" with a private key was found."#;
        let err = detect(DetectorKind::Signing, text).unwrap();
        assert_eq!(err.kind, BuildErrorKind::Signing);
        assert_eq!(err.details.as_deref(), Some("Signing identity: \"iOS Development\""));
    }

    #[test]
    fn test_signing_code_sign_error() {
        let err = detect(DetectorKind::Signing, "Code Sign error: No code signing identities found").unwrap();
        assert_eq!(err.title, "Code signing failed");
    }

    #[test]
    fn test_provisioning_capability() {
        let text = r#"error: Provisioning profile "iOS Team Provisioning Profile: com.example.app" doesn't support the Push Notifications capability. (in target 'App' from project 'App')"#;
        let err = detect(DetectorKind::Provisioning, text).unwrap();
        assert_eq!(err.title, "Provisioning profile missing capability: Push Notifications");
        assert_eq!(
            err.details.as_deref(),
            Some("Profile: \"iOS Team Provisioning Profile: com.example.app\"")
        );
    }

    #[test]
    fn test_provisioning_required() {
        let text = r#"error: "App" requires a provisioning profile. Select a provisioning profile in the Signing & Capabilities editor."#;
        let err = detect(DetectorKind::Provisioning, text).unwrap();
        assert_eq!(err.title, "Provisioning profile issue");
    }

    #[test]
    fn test_dependency_no_such_module() {
        let text = "/Users/p/App/App.swift:2:8: error: no such module 'Alamofire'\nimport Alamofire";
        let err = detect(DetectorKind::Dependency, text).unwrap();
        assert_eq!(err.kind, BuildErrorKind::Dependency);
        assert_eq!(err.title, "Missing module: 'Alamofire'");
    }

    #[test]
    fn test_dependency_fetch_failure() {
        let text = "Failed to clone repository\nCould not fetch dependency from https://github.com/x/y.git.";
        let err = detect(DetectorKind::Dependency, text).unwrap();
        assert_eq!(err.title, "Failed to fetch package dependency");
        assert_eq!(err.details.as_deref(), Some("Repository: https://github.com/x/y.git"));
        assert!(err.suggestion.unwrap().contains("Verify the repository URL"));
    }

    #[test]
    fn test_dependency_unresolved_symbol() {
        let err = detect(DetectorKind::Dependency, "error: cannot find 'Thing' in scope").unwrap();
        assert_eq!(err.title, "Unresolved symbol");
        assert_eq!(err.details.as_deref(), Some("cannot find 'Thing' in scope"));
    }

    #[test]
    fn test_configuration_name() {
        let text = r#"xcodebuild: error: The project named "App" does not contain a configuration named "Staging"."#;
        let err = detect(DetectorKind::Configuration, text).unwrap();
        assert_eq!(err.title, "Configuration not found: \"Staging\"");
    }

    #[test]
    fn test_destination_unable_to_find() {
        let text = "xcodebuild: error: Unable to find a destination matching the provided destination specifier:\n\t\t{ platform:iOS Simulator, name:iPhone 99 }";
        let err = detect(DetectorKind::Destination, text).unwrap();
        assert_eq!(err.kind, BuildErrorKind::Destination);
        assert_eq!(err.title, "Invalid destination");
    }

    #[test]
    fn test_destination_unsupported_platform() {
        let text = r#"error: Unsupported platform "watchOS" for this package"#;
        let err = detect(DetectorKind::Destination, text).unwrap();
        assert_eq!(err.title, "Unsupported platform: \"watchOS\"");
    }

    #[test]
    fn test_sdk_cannot_be_located() {
        let text = r#"xcodebuild: error: SDK "iphoneos99.0" cannot be located."#;
        let err = detect(DetectorKind::Sdk, text).unwrap();
        assert_eq!(err.kind, BuildErrorKind::Sdk);
        assert_eq!(err.title, "SDK not found: iphoneos99.0");
    }

    #[test]
    fn test_product_not_found() {
        let text = "error: product 'Logging' required by package 'app' target 'App' not found in package 'swift-log'.";
        let err = detect(DetectorKind::Product, text).unwrap();
        assert_eq!(err.title, "Product not found: 'Logging'");
    }

    #[test]
    fn test_target_not_found() {
        let err = detect(DetectorKind::Target, "error: no target named 'Widgets'").unwrap();
        assert_eq!(err.kind, BuildErrorKind::Target);
        assert_eq!(err.title, "Target not found: 'Widgets'");
    }

    #[test]
    fn test_manifest() {
        let text = "/tmp/pkg/Package.swift:12:5: error: extra argument 'foo' in call";
        let err = detect(DetectorKind::Manifest, text).unwrap();
        assert_eq!(err.kind, BuildErrorKind::Manifest);
    }

    #[test]
    fn test_project_not_found() {
        let text = "xcodebuild: error: 'Foo.xcodeproj' does not exist.";
        let err = detect(DetectorKind::ProjectNotFound, text).unwrap();
        assert_eq!(err.title, "Project or workspace not found");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_project_not_found_excludes_url_loading() {
        let text = "Error Domain=NSURLErrorDomain: the resource at /x/Foo.xcworkspace/contents does not exist";
        assert!(detect(DetectorKind::ProjectNotFound, text).is_none());
    }

    #[test]
    fn test_tool_error() {
        let text = "Command line invocation:\nxcodebuild: error: Something odd happened.\n";
        let err = detect(DetectorKind::ToolError, text).unwrap();
        assert_eq!(err.title, "xcodebuild error");
        assert_eq!(err.details.as_deref(), Some("Something odd happened."));
    }

    #[test]
    fn test_failed_commands_compile() {
        let text = "** BUILD FAILED **\n\nThe following build commands failed:\n\tSwiftCompile normal arm64 /p/A.swift (in target 'App' from project 'App')\n\tSwiftCompile normal arm64 /p/B.swift (in target 'App' from project 'App')\n\tSwiftEmitModule normal arm64 (in target 'App' from project 'App')\n\tLd /p/App normal (in target 'App' from project 'App')\n(4 failures)\n";
        let err = detect(DetectorKind::FailedCommands, text).unwrap();
        assert_eq!(err.kind, BuildErrorKind::Compile);
        let details = err.details.unwrap();
        assert_eq!(details.lines().count(), 3);
        assert!(details.starts_with("SwiftCompile normal arm64 /p/A.swift"));
    }

    #[test]
    fn test_failed_commands_generic() {
        let text = "The following build commands failed:\n\tPhaseScriptExecution Run\\ Script /p/script.sh\n(1 failure)";
        let err = detect(DetectorKind::FailedCommands, text).unwrap();
        assert_eq!(err.kind, BuildErrorKind::Generic);
        assert_eq!(err.details.as_deref(), Some("PhaseScriptExecution Run\\ Script /p/script.sh"));
    }

    #[test]
    fn test_enclosing_line() {
        let text = "first\nsecond line\nthird";
        let start = text.find("cond").unwrap();
        assert_eq!(enclosing_line(text, start, start + 4), "second line");
    }

    #[test]
    fn test_error_message() {
        assert_eq!(error_message("xcodebuild: error: broken"), "broken");
        assert_eq!(error_message("  no marker  "), "no marker");
    }
}
