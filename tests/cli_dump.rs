mod common;

use std::process::Command;

use common::{mixed_bytes, write_fixture};

fn cmd() -> Command {
    let exe = env!("CARGO_BIN_EXE_bfbin-dump");
    Command::new(exe)
}

#[test]
fn csv_dump_prints_both_table_kinds() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_fixture(&temp, "mixed.byfl", &mixed_bytes());

    let output = cmd()
        .args([path.to_str().unwrap(), "--format", "csv"])
        .output()
        .expect("run bfbin-dump");
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    assert_eq!(
        stdout,
        "# Program\n\
         Name,a.out\n\
         Loads,1099511627776\n\
         Tallied,true\n\
         \n\
         # Functions\n\
         Function,Ops,Leaf\n\
         main,7,false\n\
         helper,18446744073709551615,true\n\
         \n"
    );
}

#[test]
fn table_filter_prints_only_the_named_table() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_fixture(&temp, "mixed.byfl", &mixed_bytes());

    let output = cmd()
        .args([path.to_str().unwrap(), "--table", "Program"])
        .output()
        .expect("run bfbin-dump");
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).expect("utf-8 output");
    assert!(stdout.starts_with("== Program (key:value)\n"), "{}", stdout);
    assert!(stdout.contains("Loads\t1099511627776\n"));
    assert!(!stdout.contains("Functions"));
}

#[test]
fn summary_counts_rows_and_entries() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_fixture(&temp, "mixed.byfl", &mixed_bytes());

    let output = cmd()
        .args([path.to_str().unwrap(), "--summary"])
        .output()
        .expect("run bfbin-dump");
    assert!(output.status.success());
    assert_eq!(
        String::from_utf8(output.stdout).expect("utf-8 output"),
        "Program\t3\tentries\nFunctions\t2\trows\n"
    );
}

#[test]
fn corrupt_input_exits_with_error() {
    let temp = tempfile::tempdir().expect("tempdir");
    let path = write_fixture(&temp, "bad.byfl", b"not a byfl file");

    let output = cmd().arg(&path).output().expect("run bfbin-dump");
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("ERROR"), "stderr: {}", stderr);
    assert!(stderr.contains("bad.byfl"), "stderr: {}", stderr);
}
