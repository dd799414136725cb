//! JDK discovery.
//!
//! Locates the bootstrap class path of a JDK from:
//! - an explicitly configured home
//! - JAVA_HOME environment variable
//! - macOS java_home tool
//! - the `java` launcher's reported `java.home`
//! - Common installation paths and SDKMAN

use std::path::{Path, PathBuf};
use std::process::Command;

/// A JDK (or JRE) installation and its bootstrap class path assets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JdkInstallation {
    pub root: PathBuf,
    pub version: Option<String>,
    /// `lib/modules`, `rt.jar`, or every `jmods/*.jmod`
    pub assets: Vec<PathBuf>,
}

impl JdkInstallation {
    /// Inspects a directory as a JDK home; `None` if it has no usable assets.
    pub fn from_home(home: &Path) -> Option<Self> {
        let assets = collect_sdk_assets(home);
        if assets.is_empty() {
            return None;
        }
        Some(Self {
            root: home.to_path_buf(),
            version: detect_jdk_version(home),
            assets,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct JdkDiscoverer {
    java_home: Option<PathBuf>,
}

impl JdkDiscoverer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pins discovery to one home; no other location is searched.
    pub fn with_java_home(java_home: impl Into<PathBuf>) -> Self {
        Self {
            java_home: Some(java_home.into()),
        }
    }

    pub fn discover(&self) -> Option<JdkInstallation> {
        if let Some(home) = &self.java_home {
            return JdkInstallation::from_home(home);
        }

        // 1. JAVA_HOME
        if let Some(jdk) = std::env::var_os("JAVA_HOME")
            .and_then(|home| JdkInstallation::from_home(Path::new(&home)))
        {
            return Some(jdk);
        }

        // 2. macOS specific: Use java_home tool
        #[cfg(target_os = "macos")]
        if let Ok(output) = Command::new("/usr/libexec/java_home").output() {
            if output.status.success() {
                let path_str = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if let Some(jdk) = JdkInstallation::from_home(Path::new(&path_str)) {
                    return Some(jdk);
                }
            }
        }

        // 3. Ask the java launcher on PATH
        if let Some(jdk) = java_home_from_path().and_then(|home| JdkInstallation::from_home(&home)) {
            return Some(jdk);
        }

        // 4. Common installation paths
        for root in search_roots() {
            if !root.exists() {
                continue;
            }

            // If root itself is a JDK (e.g. Homebrew symlink)
            if let Some(jdk) = JdkInstallation::from_home(&root) {
                return Some(jdk);
            }

            // If root is a parent directory containing multiple SDKs
            if let Ok(entries) = std::fs::read_dir(&root) {
                let mut candidates: Vec<PathBuf> = entries.flatten().map(|e| e.path()).collect();
                candidates.sort();
                for mut sdk_path in candidates {
                    if cfg!(target_os = "macos") && sdk_path.join("Contents/Home").exists() {
                        sdk_path = sdk_path.join("Contents/Home");
                    }
                    if let Some(jdk) = JdkInstallation::from_home(&sdk_path) {
                        return Some(jdk);
                    }
                }
            }
        }

        None
    }
}

fn java_home_from_path() -> Option<PathBuf> {
    let output = Command::new("java")
        .arg("-XshowSettings:properties")
        .arg("-version")
        .output()
        .ok()?;
    // Settings are printed on stderr
    let stderr = String::from_utf8_lossy(&output.stderr);
    parse_java_home_setting(&stderr)
}

fn parse_java_home_setting(settings: &str) -> Option<PathBuf> {
    settings
        .lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("java.home = "))
        .map(|home| PathBuf::from(home.trim()))
}

fn search_roots() -> Vec<PathBuf> {
    let mut search_roots = Vec::new();

    #[cfg(target_os = "macos")]
    {
        search_roots.push(PathBuf::from("/Library/Java/JavaVirtualMachines/"));
        search_roots.push(PathBuf::from("/opt/homebrew/opt/openjdk/"));
        search_roots.push(PathBuf::from("/usr/local/opt/openjdk/"));
    }
    #[cfg(target_os = "linux")]
    {
        search_roots.push(PathBuf::from("/usr/lib/jvm/"));
    }
    #[cfg(target_os = "windows")]
    {
        search_roots.push(PathBuf::from("C:\\Program Files\\Java\\"));
    }

    // SDKMAN
    if let Some(mut sdkman) = dirs::home_dir() {
        sdkman.push(".sdkman/candidates/java/");
        search_roots.push(sdkman);
    }

    search_roots
}

fn detect_jdk_version(jdk_root: &Path) -> Option<String> {
    // Try to read release file
    if let Ok(content) = std::fs::read_to_string(jdk_root.join("release")) {
        for line in content.lines() {
            if let Some(version) = line.strip_prefix("JAVA_VERSION=") {
                return Some(version.trim_matches('"').to_string());
            }
        }
    }

    // Fallback: try to extract from path
    let path_str = jdk_root.to_string_lossy();
    regex::Regex::new(r"jdk-?(\d+(?:\.\d+)*)")
        .ok()
        .and_then(|re| re.captures(&path_str))
        .and_then(|cap| cap.get(1))
        .map(|m| m.as_str().to_string())
}

fn collect_sdk_assets(sdk_path: &Path) -> Vec<PathBuf> {
    if !sdk_path.exists() {
        return Vec::new();
    }

    // Priority 1: Java 9+ Runtime Image
    let modules = sdk_path.join("lib/modules");
    if modules.is_file() {
        return vec![modules];
    }

    // Priority 2: Java 8 Legacy Runtime
    for rt_jar in [sdk_path.join("jre/lib/rt.jar"), sdk_path.join("lib/rt.jar")] {
        if rt_jar.is_file() {
            return vec![rt_jar];
        }
    }

    // Priority 3: jmods (Fallback for some JDK builds without lib/modules)
    let mut jmods: Vec<PathBuf> = std::fs::read_dir(sdk_path.join("jmods"))
        .into_iter()
        .flatten()
        .flatten()
        .map(|entry| entry.path())
        .filter(|path| path.extension().and_then(|e| e.to_str()) == Some("jmod"))
        .collect();
    // java.base first so core classes win over any duplicate
    jmods.sort_by_key(|path| {
        (
            path.file_stem().and_then(|s| s.to_str()) != Some("java.base"),
            path.clone(),
        )
    });
    jmods
}
