// Peregrine Assembler and SHIMMER Genome Assembly Toolkit
// 2019, 2020, 2021- (c) by Jason, Chen-Shan, Chin
//
// This Source Code Form is subject to the terms of the
// Creative Commons Attribution-NonCommercial-ShareAlike 4.0 International License.
//
// You should have received a copy of the license along with this
// work. If not, see <http://creativecommons.org/licenses/by-nc-sa/4.0/>.

use std::process::Command;

fn main() {
    // tag the binaries with the git revision when we build from a checkout
    let pkg_version = env!("CARGO_PKG_VERSION");
    let git_rev = Command::new("git")
        .args(&["rev-parse", "--short", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .unwrap_or_default();
    let version = if git_rev.is_empty() {
        pkg_version.to_string()
    } else {
        format!("{}-{}", pkg_version, git_rev)
    };
    println!("cargo:rustc-env=VERSION_STRING={}", version);
    println!("cargo:rerun-if-changed=build.rs");
}
