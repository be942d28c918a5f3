use assert_cmd::Command;
use std::fs;
use tempfile::TempDir;

#[test]
fn command_run() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("dna.txt");
    fs::write(&input, "TGTTGTTGTTGT\nTGTTGTTGTTGT\nTGTTGTTGTTGT\n")?;

    let mut cmd = Command::cargo_bin("trac")?;
    let output = cmd.arg("run").arg(&input).arg("--frame").arg("0").output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    assert_eq!(stdout.lines().count(), 12);
    assert_eq!(
        stdout,
        "# proteins\n\
         seq1\t0\tCCCC\nseq2\t0\tCCCC\nseq3\t0\tCCCC\n\
         # alignments\n\
         0\t1\t36\tCCCC\tCCCC\n0\t2\t36\tCCCC\tCCCC\n1\t2\t36\tCCCC\tCCCC\n\
         # labels\n\
         seq1\t1\nseq2\t1\nseq3\t1\n"
    );

    Ok(())
}

#[test]
fn command_run_cluster_alignments() -> anyhow::Result<()> {
    let temp = TempDir::new()?;
    let input = temp.path().join("dna.txt");
    fs::write(&input, "TGTTGTTGTTGT\nTGTTGTTGTTGT\nTGTTGTTGTTGT\n")?;

    let mut cmd = Command::cargo_bin("trac")?;
    let output = cmd
        .arg("run")
        .arg(&input)
        .arg("--frame")
        .arg("0")
        .arg("--cluster-on")
        .arg("alignments")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert_eq!(stdout.lines().count(), 15);
    let labels: Vec<&str> = stdout
        .lines()
        .skip_while(|line| *line != "# labels")
        .skip(1)
        .collect();
    assert_eq!(
        labels,
        vec![
            "0-1:seq1\t1",
            "0-1:seq2\t1",
            "0-2:seq1\t1",
            "0-2:seq3\t1",
            "1-2:seq2\t1",
            "1-2:seq3\t1",
        ]
    );

    Ok(())
}

#[test]
fn command_run_all_frames() -> anyhow::Result<()> {
    let mut cmd = Command::cargo_bin("trac")?;
    let output = cmd
        .arg("run")
        .arg("tests/trac/dna.txt")
        .arg("--parallel")
        .arg("2")
        .output()?;
    let stdout = String::from_utf8(output.stdout)?;

    assert!(output.status.success());
    // 6 proteins, 15 pairs, 6 labels and three headers
    assert_eq!(stdout.lines().count(), 30);
    assert!(stdout.contains("seq1_f1\t1\tVVV\n"));
    assert!(stdout.contains("seq2_f2\t2\tGL\n"));
    assert!(stdout.contains("0\t5\t"));

    Ok(())
}
