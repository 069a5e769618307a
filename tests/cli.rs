use assert_cmd::Command;
use predicates::prelude::*;
use std::io::Write;
use tempfile::NamedTempFile;

fn uniplot() -> Command {
    let mut cmd = Command::cargo_bin("uniplot").unwrap();
    cmd.args(["--headless", "--seed", "42"]);
    cmd
}

#[test]
fn manual_line_plot_transcript() {
    let script = "1\n1 2 3\n1\nA\n10 20 30\n1\n1\n1\n1\nA\nT\nX\nY\n";
    uniplot()
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "line x=[1, 2, 3] y=[10, 20, 30] color=red label=\"A\" linestyle=- marker=o",
        ))
        .stdout(predicate::str::contains(
            "title \"T\"\nxlabel \"X\"\nylabel \"Y\"\nlegend\ngrid\nshow\n",
        ));
}

#[test]
fn short_color_list_is_fatal() {
    // Three ranged series but only two valid color indices.
    let script = "3\n0\n1\n3\n3\nA\n1\n1\nB\n2\n1\nC\n3\n1\n1\n1\n1\n1 2 99\na\nb\nc\nT\nX\nY\n";
    uniplot()
        .write_stdin(script)
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains(
            "Error: colors has 2 entries but there are 3 series",
        ))
        .stdout(predicate::str::contains("line x=").not());
}

#[test]
fn csv_columns_become_series() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "x,a,b").unwrap();
    for i in 1..=5 {
        writeln!(file, "{},{},{}", i, i * 2, i * 3).unwrap();
    }
    let path = file.path().display().to_string();

    // Box plot keeps the labels entered at the end.
    let script = format!("4\n{path}\n7\n1\n1\n1 2\nfirst\nsecond\nT\nX\nY\n");
    uniplot()
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Enter label for Y2 data: "))
        .stdout(predicate::str::contains(
            "box groups=[[2, 4, 6, 8, 10], [3, 6, 9, 12, 15]] labels=[\"first\", \"second\"]",
        ));
}

#[test]
fn missing_csv_asks_for_another_path() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "1,5\n2,6").unwrap();
    let path = file.path().display().to_string();

    let script = format!("4\n/no/such/file.csv\n{path}\n2\n1\n1\n2\nA\nT\nX\nY\n");
    uniplot()
        .write_stdin(script)
        .assert()
        .success()
        .stdout(predicate::str::contains("Error: Failed to load /no/such/file.csv"))
        .stdout(predicate::str::contains(
            "scatter x=[1, 2] y=[5, 6] color=blue label=\"A\"",
        ));
}

#[test]
fn seeded_random_data_is_reproducible() {
    let script = "2\n1\n20\n10\n1\n1\n1\nA\nT\nX\nY\n";
    let first = uniplot().write_stdin(script).output().unwrap();
    let second = uniplot().write_stdin(script).output().unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);

    let text = String::from_utf8(first.stdout).unwrap();
    assert!(text.contains("hexbin x=[0, "));
    assert!(text.contains("gridsize=30 cmap=Blues"));
    assert!(text.contains("colorbar label=\"Counts\""));
}

#[test]
fn pie_is_drawn_once_per_series() {
    let script = "1\n1 2\n2\nA\n1 3\nB\n2 2\n5\n1\n1\n1 2\nA\nB\nShares\nX\nY\n";
    let output = uniplot().write_stdin(script).output().unwrap();
    assert!(output.status.success());

    let text = String::from_utf8(output.stdout).unwrap();
    assert_eq!(text.matches("pie values=").count(), 2);
    assert_eq!(text.matches("axis equal").count(), 2);
    assert!(text.contains("pie values=[1, 3] labels=[\"A\", \"B\"] autopct=%1.1f%%"));
}

#[test]
fn closed_input_is_reported() {
    uniplot()
        .write_stdin("1\n1 2 3\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Error: Input closed before the session completed",
        ));
}
