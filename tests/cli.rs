use assert_cmd::Command;
use predicates::str::contains;

fn segtree() -> Command {
    Command::cargo_bin("segtree").unwrap()
}

// `segtree` with no args should exit with a non-zero code.
#[test]
fn cli_no_args() {
    segtree().assert().failure();
}

#[test]
fn cli_version() {
    segtree()
        .arg("-V")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn cli_sum_session() {
    segtree()
        .arg("[3,5,10,20,45,60]")
        .write_stdin("query 2 5\nupdate 4 5 add 1\nquery 2 5\n")
        .assert()
        .success()
        .stdout("135\n145\n137\n");
}

#[test]
fn cli_product_session() {
    segtree()
        .args(&["--op", "product", "[3,5,10,20,45,60]"])
        .write_stdin("query 1 4\n\n# times five\nupdate 1 4 mul 5\nquery 1 4\n")
        .assert()
        .success()
        .stdout("45000\n5062500000\n28125000\n");
}

#[test]
fn cli_min_max() {
    segtree()
        .args(&["-o", "min", "[4,3,2,8,5,1,2,1]"])
        .write_stdin("query 0 3\nquery 4 4\nquery 9 12\n")
        .assert()
        .success()
        .stdout("2\n5\n9223372036854775807\n");
    segtree()
        .args(&["-o", "max", "[4,3,2,8,5,1,2,1]"])
        .write_stdin("query 4 7\nupdate 5 5 set 11\nquery 4 7\n")
        .assert()
        .success()
        .stdout("5\n11\n11\n");
}

#[test]
fn cli_concat_session() {
    segtree()
        .args(&["--op", "concat", r#"["hello","world","this","is","a","test"]"#])
        .write_stdin("query 1 4\nquery 4 1\nupdate 0 0 append \", \"\nquery 0 1\n")
        .assert()
        .success()
        .stdout("\"worldthisisa\"\n\"\"\n\"hello, worldthisisatest\"\n\"hello, world\"\n");
}

#[test]
fn cli_empty_values() {
    segtree()
        .arg("[]")
        .write_stdin("query 0 0\n")
        .assert()
        .failure()
        .stderr(contains("source sequence cannot be empty"));
}

#[test]
fn cli_element_mismatch() {
    segtree()
        .args(&["--op", "concat", "[1,2,3]"])
        .assert()
        .failure()
        .stderr(contains("operation `concat` does not accept these values"));
    segtree()
        .args(&["--op", "sum", r#"["a","b"]"#])
        .assert()
        .failure()
        .stderr(contains("operation `sum` does not accept these values"));
}

#[test]
fn cli_invalid_command() {
    segtree()
        .arg("[1,2,3]")
        .write_stdin("query 0 2\ndelete 0 1\nquery 0 2\n")
        .assert()
        .failure()
        .stdout("6\n")
        .stderr(contains("unknown command `delete`"));
}

#[test]
fn cli_invalid_values() {
    segtree()
        .arg("not json")
        .assert()
        .failure();
    segtree()
        .args(&["--op", "unknown", "[1]"])
        .assert()
        .failure();
}

#[test]
fn cli_text_argument_keeps_spacing() {
    segtree()
        .args(&["--op", "concat", r#"["a","b"]"#])
        .write_stdin("update 0 0 append  x  y\nquery 0 1\n")
        .assert()
        .success()
        .stdout("\"ax  yb\"\n\"ax  yb\"\n");
}
