//! CLI integration tests: build a catalog from a small GTF and query it.

use assert_cmd::Command;
use predicates::prelude::*;

const GTF: &str = concat!(
    "chr3\tHAVANA\tgene\t1001\t5000\t.\t-\t.\tgene_id \"ENSG01\"; gene_name \"BCL6\";\n",
    "chr3\tHAVANA\ttranscript\t1001\t3000\t.\t-\t.\tgene_id \"ENSG01\"; transcript_id \"ENST01\"; transcript_name \"BCL6-201\";\n",
    "chr3\tHAVANA\texon\t1001\t1200\t.\t-\t.\tgene_id \"ENSG01\"; transcript_id \"ENST01\"; exon_id \"ENSE01\";\n",
);

struct Workspace {
    dir: tempfile::TempDir,
}

impl Workspace {
    fn new() -> Self {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("annotation.gtf"), GTF).unwrap();
        Self { dir }
    }

    fn path(&self, name: &str) -> String {
        self.dir.path().join(name).to_string_lossy().into_owned()
    }

    fn build_catalog(&self) {
        Command::cargo_bin("genedex")
            .unwrap()
            .arg("build")
            .arg(self.path("annotation.gtf"))
            .arg("-o")
            .arg(self.path("catalog.json"))
            .args(["--width", "1000"])
            .assert()
            .success()
            .stdout(predicate::str::contains("wrote 3 records"));
    }
}

#[test]
fn build_then_query_region() {
    let ws = Workspace::new();
    ws.build_catalog();

    Command::cargo_bin("genedex")
        .unwrap()
        .arg("query")
        .arg("--catalog")
        .arg(ws.path("catalog.json"))
        .args(["--chr", "chr3", "-s", "1000", "-e", "2000", "-w", "1000"])
        .args(["--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"gene_id\": \"ENSG01\""))
        .stdout(predicate::str::contains("\"transcript_id\": \"ENST01\""))
        .stdout(predicate::str::contains("\"exon_id\": \"ENSE01\""));
}

#[test]
fn query_unknown_chromosome_fails() {
    let ws = Workspace::new();
    ws.build_catalog();

    Command::cargo_bin("genedex")
        .unwrap()
        .arg("query")
        .arg("--catalog")
        .arg(ws.path("catalog.json"))
        .args(["--chr", "chrX", "-s", "0", "-e", "1000", "-w", "1000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown chromosome"));
}

#[test]
fn query_unbuilt_width_fails() {
    let ws = Workspace::new();
    ws.build_catalog();

    Command::cargo_bin("genedex")
        .unwrap()
        .arg("query")
        .arg("--catalog")
        .arg(ws.path("catalog.json"))
        .args(["--chr", "chr3", "-s", "0", "-e", "1000", "-w", "512"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no bin index built at width 512"));
}

#[test]
fn search_matches_case_insensitively() {
    let ws = Workspace::new();
    ws.build_catalog();

    Command::cargo_bin("genedex")
        .unwrap()
        .args(["search", "bcl6", "--catalog"])
        .arg(ws.path("catalog.json"))
        .assert()
        .success()
        .stdout(predicate::str::contains("ENSG01"))
        .stdout(predicate::str::contains("BCL6"));
}

#[test]
fn search_unknown_source_fails() {
    let ws = Workspace::new();
    ws.build_catalog();

    Command::cargo_bin("genedex")
        .unwrap()
        .args(["search", "bcl6", "--catalog"])
        .arg(ws.path("catalog.json"))
        .args(["--genome", "Zebrafish"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown source"));
}
