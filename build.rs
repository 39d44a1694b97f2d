use chrono::{DateTime, Local};
use std::{process::Command, time::SystemTime};

fn exe_cmd(cmd: &mut Command) -> anyhow::Result<String> {
    let output = cmd.output()?;

    if output.status.success() {
        Ok(String::from_utf8(output.stdout)?)
    } else {
        anyhow::bail!("{}", String::from_utf8_lossy(&output.stderr))
    }
}

fn main() {
    // 不在git仓库中构建时, 只输出版本号和构建时间
    let git_commit_hash = exe_cmd(Command::new("git").args(["log", "-n", "1", "--pretty=format:%H"]))
        .map(|s| s[..8.min(s.len())].trim().to_string())
        .unwrap_or_default();

    println!(
        "cargo:rustc-env=RSA_OAEP_VERSION_INFO={}-{}{}",
        env!("CARGO_PKG_VERSION"),
        DateTime::<Local>::from(SystemTime::now()).format("%Y/%m/%d-%H:%M:%S:%Z"),
        if git_commit_hash.is_empty() {
            String::default()
        } else {
            format!("-{git_commit_hash}")
        }
    );
}
