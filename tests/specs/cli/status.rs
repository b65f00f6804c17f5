//! `rr status` specs

use crate::prelude::*;

const MIXED_TABLE: &str = "\
isbn,result
9780306406157,TP312
9787111547426,
0306406152,failed: retry limit exceeded
,
9780000000000,Skipped: invalid isbn
9780262033848,Error: timeout
";

#[test]
fn status_counts_each_category() {
    let temp = Project::empty();
    temp.file("books.csv", MIXED_TABLE);

    temp.rr().args(&["status", "books.csv"]).passes().stdout_eq(
        "\
total:     6
resolved:  1
pending:   1
failed:    2
skipped:   1
blank key: 1
",
    );
}

#[test]
fn status_json_output() {
    let temp = Project::empty();
    temp.file("books.csv", MIXED_TABLE);

    let out = temp.rr().args(&["status", "books.csv", "-o", "json"]).passes();
    let json = out.json();

    assert_eq!(json["total"], 6);
    assert_eq!(json["failed"], 2);
}

#[test]
fn status_does_not_modify_the_table() {
    let temp = Project::empty();
    temp.file("books.csv", MIXED_TABLE);

    temp.rr().args(&["status", "books.csv"]).passes();

    assert_eq!(temp.read("books.csv"), MIXED_TABLE);
}

#[test]
fn status_reads_json_tables() {
    let temp = Project::empty();
    temp.file(
        "books.json",
        r#"[{"isbn": "9780306406157", "result": "TP312"}, {"isbn": "9787111547426"}]"#,
    );

    temp.rr()
        .args(&["status", "books.json"])
        .passes()
        .stdout_has("resolved:  1")
        .stdout_has("pending:   1");
}
