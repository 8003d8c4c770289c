use std::path::Path;

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use gitviz_core::{CommitId, DateFilter};
use gitviz_graph::dot::{save_dot, to_dot};
use gitviz_graph::{link, link_ancestry, render, RenderConfig, Role};
use gitviz_store::layout::RepoLayout;
use gitviz_store::loose::write_loose_object;
use gitviz_store::object::encode_object;
use gitviz_store::{GitRepo, StoreError, WalkStats};

const A: &str = "abcdef1234567890abcdef1234567890abcdef12";
const B: &str = "1234567890abcdef1234567890abcdef12345678";
const C: &str = "c0ffee00c0ffee00c0ffee00c0ffee00c0ffee00";
const D: &str = "d00dfeedd00dfeedd00dfeedd00dfeedd00dfeed";
const TREE: &str = "4b825dc642cb6eb9a060e54bf8d69288fbee4904";
/// 2024-12-01 00:00:00 UTC
const T: i64 = 1_733_011_200;

struct TestRepo {
    _tmp: tempfile::TempDir,
    layout: RepoLayout,
}

impl TestRepo {
    fn new() -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let layout = RepoLayout::new(&tmp.path().join(".git"));
        layout.create_dirs().unwrap();
        Self { _tmp: tmp, layout }
    }

    fn root(&self) -> &Path {
        self._tmp.path()
    }

    fn head_on_branch(&self, tip: &str) -> &Self {
        std::fs::write(self.layout.head_file(), "ref: refs/heads/main\n").unwrap();
        std::fs::write(self.layout.refs_dir().join("heads/main"), format!("{tip}\n")).unwrap();
        self
    }

    fn raw(&self, id: &str, kind: &str, body: &str) -> &Self {
        let bytes = encode_object(kind, body.as_bytes()).unwrap();
        write_loose_object(&self.layout, &CommitId::new(id), &bytes).unwrap();
        self
    }

    fn commit(&self, id: &str, parents: &[&str], seconds: i64, zone: &str) -> &Self {
        let mut body = format!("tree {TREE}\n");
        for parent in parents {
            body.push_str(&format!("parent {parent}\n"));
        }
        body.push_str(&format!("author A U Thor <author@example.com> {seconds} {zone}\n"));
        body.push_str(&format!("committer C O Mitter <committer@example.com> {seconds} {zone}\n"));
        body.push_str("\nA commit message\n");
        self.raw(id, "commit", &body)
    }

    fn open(&self) -> GitRepo {
        GitRepo::open(self.root()).unwrap()
    }
}

fn at(seconds: i64) -> DateFilter {
    DateFilter::at(Utc.timestamp_opt(seconds, 0).unwrap())
}

#[test]
fn two_commits_without_filter() {
    let repo = TestRepo::new();
    repo.head_on_branch(A)
        .commit(B, &[], T, "+0000")
        .commit(A, &[B], T + 4000, "+0000");

    let walk = repo.open().walk(None).unwrap();
    assert_eq!(walk.head, CommitId::new(A));
    assert_eq!(walk.table.len(), 2);

    let table = link_ancestry(walk.table);
    let b = table.get(&CommitId::new(B)).unwrap();
    assert_eq!(b.children.iter().collect::<Vec<_>>(), vec![&CommitId::new(A)]);

    let graph = render(&table, &walk.head, &RenderConfig::default()).unwrap();
    let order: Vec<&str> = graph.nodes.iter().map(|n| n.id.as_str()).collect();
    assert_eq!(order, vec![B, A]);
    assert_eq!(graph.nodes[0].role, Role::Ancestor);
    assert_eq!(graph.nodes[0].color, "blue");
    assert_eq!(graph.nodes[1].role, Role::Head);
    assert_eq!(graph.nodes[1].color, "red");
    assert_eq!(graph.edges.len(), 1);
    assert_eq!(graph.edges[0].parent, CommitId::new(B));
    assert_eq!(graph.edges[0].child, CommitId::new(A));
}

#[test]
fn two_commits_with_cutoff_before_child() {
    let repo = TestRepo::new();
    repo.head_on_branch(A)
        .commit(B, &[], T, "+0000")
        .commit(A, &[B], T + 4000, "+0000");

    let walk = repo.open().walk(Some(&at(T))).unwrap();
    assert_eq!(walk.table.len(), 1);
    assert_eq!(walk.stats.excluded, 1);

    let table = link_ancestry(walk.table);
    assert!(table.get(&CommitId::new(B)).unwrap().children.is_empty());

    let graph = render(&table, &walk.head, &RenderConfig::default()).unwrap();
    assert_eq!(graph.nodes.len(), 1);
    assert!(graph.edges.is_empty());
    assert_eq!(graph.nodes[0].role, Role::Leaf);
    assert_eq!(graph.nodes[0].color, "green");
    assert!(graph.node(&walk.head).is_none());
}

#[test]
fn malformed_author_is_skipped() {
    let repo = TestRepo::new();
    repo.head_on_branch(A)
        .commit(B, &[], T, "+0000")
        .commit(A, &[B], T + 10, "+0000")
        .raw(
            C,
            "commit",
            &format!("tree {TREE}\nparent {A}\nauthor John Doe john@example.com {T} +0300\n\nbroken\n"),
        );

    let walk = repo.open().walk(None).unwrap();
    assert_eq!(walk.table.len(), 2);
    assert!(!walk.table.contains(&CommitId::new(C)));
    assert_eq!(walk.stats.skipped, 1);
}

#[test]
fn non_commit_objects_and_junk_are_ignored() {
    let repo = TestRepo::new();
    repo.head_on_branch(A)
        .commit(A, &[], T, "+0000")
        .raw(TREE, "tree", "100644 file\0aaaaaaaaaaaaaaaaaaaa")
        .raw(D, "blob", "hello\n");
    let objects = repo.layout.objects_dir();
    std::fs::create_dir_all(objects.join("info")).unwrap();
    std::fs::write(objects.join("info").join("packs"), "P pack-1.pack\n").unwrap();
    std::fs::create_dir_all(objects.join("ff")).unwrap();
    std::fs::write(objects.join("ff").join("ee"), b"\x78\x9c\x00\x01").unwrap();

    let walk = repo.open().walk(None).unwrap();
    assert_eq!(walk.table.len(), 1);
    assert_eq!(walk.stats.not_commits, 2);
    assert_eq!(walk.stats.skipped, 1);
}

#[test]
fn pack_directory_is_not_walked() {
    let repo = TestRepo::new();
    repo.head_on_branch(A).commit(A, &[], T, "+0000");
    let pack = repo.layout.objects_dir().join("pack");
    std::fs::create_dir_all(&pack).unwrap();
    std::fs::write(pack.join("pack-1234.pack"), vec![0x50u8; 1 << 20]).unwrap();
    std::fs::write(pack.join("pack-1234.idx"), b"\xfftOc\x00\x00\x00\x02").unwrap();

    let walk = repo.open().walk(None).unwrap();
    assert_eq!(walk.table.len(), 1);
    assert_eq!(
        walk.stats,
        WalkStats {
            commits: 1,
            not_commits: 0,
            excluded: 0,
            skipped: 0,
        }
    );
}

#[test]
fn zone_offset_shifts_rendered_date() {
    let repo = TestRepo::new();
    repo.head_on_branch(A).commit(A, &[], T, "-0530");

    let walk = repo.open().walk(None).unwrap();
    let graph =
        render(&link_ancestry(walk.table), &walk.head, &RenderConfig::default()).unwrap();
    assert_eq!(graph.nodes[0].label, "#1\nabcdef1\n2024-11-30 18:30:00");
}

#[test]
fn calendar_filter_keeps_whole_day() {
    let repo = TestRepo::new();
    repo.head_on_branch(A)
        .commit(B, &[], T + 86_399, "+0000")
        .commit(A, &[B], T + 86_400, "+0000");

    let filter: DateFilter = "2024-12-01".parse().unwrap();
    let walk = repo.open().walk(Some(&filter)).unwrap();
    assert_eq!(walk.table.len(), 1);
    assert!(walk.table.contains(&CommitId::new(B)));
}

#[test]
fn detached_head_and_packed_refs() {
    let repo = TestRepo::new();
    repo.commit(A, &[], T, "+0000");
    std::fs::write(repo.layout.head_file(), format!("{A}\n")).unwrap();
    assert_eq!(repo.open().walk(None).unwrap().head, CommitId::new(A));

    std::fs::write(repo.layout.head_file(), "ref: refs/heads/main\n").unwrap();
    std::fs::write(
        repo.layout.packed_refs_file(),
        format!("# pack-refs with: peeled fully-peeled sorted\n{A} refs/heads/main\n"),
    )
    .unwrap();
    assert_eq!(repo.open().walk(None).unwrap().head, CommitId::new(A));
}

#[test]
fn bare_repository() {
    let tmp = tempfile::tempdir().unwrap();
    let layout = RepoLayout::new(tmp.path());
    layout.create_dirs().unwrap();
    std::fs::write(layout.head_file(), format!("{A}\n")).unwrap();
    let bytes = encode_object("commit", format!("author X <x@y> {T} +0000\n").as_bytes()).unwrap();
    write_loose_object(&layout, &CommitId::new(A), &bytes).unwrap();

    let walk = GitRepo::open(tmp.path()).unwrap().walk(None).unwrap();
    assert_eq!(walk.table.len(), 1);
}

#[test]
fn unresolvable_head_is_fatal() {
    let repo = TestRepo::new();
    repo.commit(A, &[], T, "+0000");
    assert!(matches!(
        repo.open().walk(None),
        Err(StoreError::HeadMissing(_))
    ));

    std::fs::write(repo.layout.head_file(), "ref: refs/heads/main\n").unwrap();
    assert!(matches!(
        repo.open().walk(None),
        Err(StoreError::RefNotFound(_))
    ));

    std::fs::write(repo.layout.head_file(), "garbage\n").unwrap();
    assert!(matches!(
        repo.open().walk(None),
        Err(StoreError::MalformedHead(_))
    ));
}

#[test]
fn missing_object_dir_is_fatal() {
    let repo = TestRepo::new();
    repo.head_on_branch(A);
    std::fs::remove_dir_all(repo.layout.objects_dir()).unwrap();
    assert!(matches!(
        repo.open().walk(None),
        Err(StoreError::ObjectsDirMissing(_))
    ));
}

#[test]
fn shallow_history_has_dangling_parents() {
    let repo = TestRepo::new();
    repo.head_on_branch(A).commit(A, &[D], T, "+0000");

    let walk = repo.open().walk(None).unwrap();
    let table = link_ancestry(walk.table);
    assert!(link::is_consistent(&table));
    let graph = render(&table, &walk.head, &RenderConfig::default()).unwrap();
    assert_eq!(graph.nodes.len(), 1);
    assert!(graph.edges.is_empty());
}

#[test]
fn merge_history_end_to_end_dot() {
    let repo = TestRepo::new();
    repo.head_on_branch(D)
        .commit(A, &[], T, "+0000")
        .commit(B, &[A], T + 60, "+0000")
        .commit(C, &[A], T + 120, "+0000")
        .commit(D, &[B, C], T + 180, "+0000");

    let walk = repo.open().walk(None).unwrap();
    let table = link_ancestry(walk.table);
    let graph = render(&table, &walk.head, &RenderConfig::default()).unwrap();
    let dot = to_dot(&graph);

    assert!(dot.starts_with("digraph {\n\trankdir=TB\n"));
    assert!(dot.contains(&format!(
        "\t\"{A}\" [label=\"#1\\nabcdef1\\n2024-12-01 00:00:00\" color=\"blue\" style=\"filled\"]\n"
    )));
    assert!(dot.contains(&format!(
        "\t\"{D}\" [label=\"#4\\nd00dfee\\n2024-12-01 00:03:00\" color=\"red\" style=\"filled\"]\n"
    )));
    assert!(dot.contains(&format!("\t\"{B}\" -> \"{D}\"\n")));
    assert!(dot.contains(&format!("\t\"{C}\" -> \"{D}\"\n")));
    assert_eq!(dot.matches(" -> ").count(), 4);

    let out = repo.root().join("graph.dot");
    save_dot(&dot, &out).unwrap();
    assert_eq!(std::fs::read_to_string(&out).unwrap(), dot);

    let json = serde_json::to_value(&graph).unwrap();
    assert_eq!(json["nodes"][3]["role"], "head");
    assert_eq!(json["nodes"][0]["id"], A);
}

#[test]
fn empty_object_store_renders_empty_graph() {
    let repo = TestRepo::new();
    repo.head_on_branch(A);

    let walk = repo.open().walk(None).unwrap();
    let graph =
        render(&link_ancestry(walk.table), &walk.head, &RenderConfig::default()).unwrap();
    assert!(graph.is_empty());
    assert_eq!(to_dot(&graph), "digraph {\n\trankdir=TB\n}\n");
}

fn history_repo() -> TestRepo {
    let repo = TestRepo::new();
    repo.head_on_branch(D)
        .commit(A, &[], T, "+0000")
        .commit(B, &[A], T + 1_000, "+0100")
        .commit(C, &[A], T + 5_000, "-0200")
        .commit(D, &[B, C], T + 9_000, "+0000");
    repo
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn narrower_cutoff_yields_subset(x in -2_000i64..12_000, y in -2_000i64..12_000) {
        let (lo, hi) = if x <= y { (x, y) } else { (y, x) };
        let repo = history_repo();
        let git = repo.open();
        let narrow = git.walk(Some(&at(T + lo))).unwrap().table;
        let wide = git.walk(Some(&at(T + hi))).unwrap().table;
        for id in narrow.ids() {
            prop_assert!(wide.contains(id));
        }
        prop_assert!(narrow.len() <= wide.len());
    }
}
