use std::path::PathBuf;
use std::process::Command;

fn empty_dir() -> PathBuf {
    let dir = std::env::temp_dir().join(format!("mano-hand-cwd-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

#[test]
fn missing_texture_exits_with_diagnostic() {
    let dir = empty_dir();
    let output = Command::new(env!("CARGO_BIN_EXE_mano-hand"))
        .current_dir(&dir)
        .env("RUST_LOG", "off")
        .output()
        .unwrap();
    std::fs::remove_dir_all(&dir).ok();

    assert!(!output.status.success());
    #[cfg(unix)]
    assert_eq!(output.status.code(), Some(255));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("failed to load exoskeleton texture"), "{stderr}");
    assert!(stderr.contains("texturaCromo.jpg"), "{stderr}");
    assert_eq!(stderr.lines().count(), 1, "{stderr}");
}
