use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

#[test]
fn command_align() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("protein.txt");
    fs::write(&input, "CCCC CCC MKV\n")?;

    let mut cmd = Command::cargo_bin("trac")?;
    let output = cmd.arg("align").arg(&input).output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert_eq!(stdout.lines().count(), 3);
    assert!(stdout.starts_with("0\t1\t25\tCCCC\t-CCC\n"));

    let pairs: Vec<String> = stdout
        .lines()
        .map(|line| line.split('\t').take(2).collect::<Vec<_>>().join(","))
        .collect();
    assert_eq!(pairs, vec!["0,1", "0,2", "1,2"]);

    for line in stdout.lines() {
        let fields: Vec<&str> = line.split('\t').collect();
        assert_eq!(fields.len(), 5);
        assert_eq!(fields[3].len(), fields[4].len());
    }

    Ok(())
}

#[test]
fn command_align_methods_agree() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("protein.fa");
    fs::write(
        &input,
        ">p1\nHEAGAWGHEE\n>p2\nPAWHEAE\n>p3\nMKTAYIAKQRQISFVKSHFSRQ\n>p4\nMKTAYIAKQRDILDLWIYHTQ\n",
    )?;

    let scores = |method: &str, parallel: &str| -> anyhow::Result<Vec<String>> {
        let mut cmd = Command::cargo_bin("trac")?;
        let output = cmd
            .arg("align")
            .arg(&input)
            .arg("--method")
            .arg(method)
            .arg("--parallel")
            .arg(parallel)
            .output()?;
        let stdout = String::from_utf8(output.stdout)?;
        Ok(stdout
            .lines()
            .map(|line| line.split('\t').take(3).collect::<Vec<_>>().join("\t"))
            .collect())
    };

    let full = scores("full", "1")?;
    assert_eq!(full.len(), 6);
    assert_eq!(scores("linear", "1")?, full);
    assert_eq!(scores("linear", "4")?, full);
    assert_eq!(scores("auto", "2")?, full);

    Ok(())
}

#[test]
fn command_align_unknown_symbol() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("protein.txt");
    fs::write(&input, "CCCC CJC CCC\n")?;

    let mut cmd = Command::cargo_bin("trac")?;
    let output = cmd.arg("align").arg(&input).output()?;
    let stdout = String::from_utf8(output.stdout)?;
    let stderr = String::from_utf8(output.stderr)?;

    assert!(output.status.success());
    assert_eq!(stdout.lines().count(), 1);
    assert!(stdout.starts_with("0\t2\t"));
    assert!(stderr.contains("(0, 1)"));
    assert!(stderr.contains("(1, 2)"));

    Ok(())
}

#[test]
fn command_align_custom_matrix() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("protein.txt");
    fs::write(&input, "AB\nAB\n")?;
    let matrix = temp.path().join("ab.mat");
    fs::write(&matrix, "A B\n1 0\n0 1\n")?;

    let mut cmd = Command::cargo_bin("trac")?;
    let output = cmd
        .arg("align")
        .arg(&input)
        .arg("--matrix")
        .arg(&matrix)
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout, "0\t1\t2\tAB\tAB\n");

    Ok(())
}

#[test]
fn command_align_positive_gap() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("protein.txt");
    fs::write(&input, "CCCC CCC\n")?;

    let mut cmd = Command::cargo_bin("trac")?;
    let output = cmd.arg("align").arg(&input).arg("--gap").arg("3").output()?;
    let stderr = String::from_utf8(output.stderr)?;

    assert!(!output.status.success());
    assert!(stderr.contains("gap penalty"));

    Ok(())
}

#[test]
fn command_align_huge_gap() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("protein.txt");
    fs::write(&input, "CCC C\n")?;

    let mut cmd = Command::cargo_bin("trac")?;
    let output = cmd
        .arg("align")
        .arg(&input)
        .arg("--gap")
        .arg("-1073741824")
        .output()?;
    let stderr = String::from_utf8(output.stderr)?;

    assert!(!output.status.success());
    assert!(stderr.contains("gap penalty must be at least"));

    Ok(())
}

#[test]
fn command_align_gap_symbol() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("protein.txt");
    fs::write(&input, "C-C C-C CC\n")?;
    let matrix = temp.path().join("gap.mat");
    fs::write(&matrix, "C\t-\n9\t-4\n-4\t1\n")?;

    for method in ["full", "linear"] {
        let mut cmd = Command::cargo_bin("trac")?;
        let output = cmd
            .arg("align")
            .arg(&input)
            .arg("--matrix")
            .arg(&matrix)
            .arg("--method")
            .arg(method)
            .output()?;
        let stdout = String::from_utf8(output.stdout)?;

        // every pair holds a '-' input, so nothing is aligned
        assert!(!output.status.success());
        assert!(stdout.is_empty());
    }

    Ok(())
}
