use std::collections::HashSet;
use std::fs;

use bingocard::{
    CardError, CardProfile, CardRenderer, Corpus, GridGeometry, PageGeometry, ProfileRegistry,
    fill_with, generate_card, load_fixed_grid,
};
use pretty_assertions::assert_eq;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn write_corpus(dir: &tempfile::TempDir, lines: usize) -> std::path::PathBuf {
    let path = dir.path().join("nominees.txt");
    let text: String = (1..=lines).map(|i| format!("Nominee {}\n\n", i)).collect();
    fs::write(&path, text).unwrap();
    path
}

#[test]
fn exact_corpus_fills_every_open_cell_once() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_corpus(&dir, 24);
    let grid = GridGeometry::default();
    let card = generate_card(&path, &grid).unwrap();

    assert_eq!(card.get(2, 2), "");
    let values: HashSet<&str> = card.values().collect();
    assert_eq!(values.len(), 24);
    let expected: HashSet<String> = (1..=24).map(|i| format!("Nominee {}", i)).collect();
    assert!(values.iter().all(|v| expected.contains(*v)));
}

#[test]
fn short_corpus_leaves_trailing_cells_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_corpus(&dir, 5);
    let corpus = Corpus::load(&path).unwrap();
    let card = fill_with(&corpus, &GridGeometry::default(), &mut StdRng::seed_from_u64(11));

    let filled: Vec<(usize, usize)> = (0..5)
        .flat_map(|r| (0..5).map(move |c| (r, c)))
        .filter(|&(r, c)| !card.get(r, c).is_empty())
        .collect();
    assert_eq!(filled, vec![(0, 0), (0, 1), (0, 2), (0, 3), (0, 4)]);
}

#[test]
fn missing_corpus_is_unavailable() {
    let dir = tempfile::tempdir().unwrap();
    let err = generate_card(&dir.path().join("absent.txt"), &GridGeometry::default()).unwrap_err();
    assert!(matches!(err, CardError::CorpusUnavailable { .. }));
    assert!(err.to_string().contains("absent.txt"));
}

#[test]
fn fixed_grid_renders_to_single_page_pdf() {
    let grid = GridGeometry::default();
    let card = load_fixed_grid(
        "Best Picture, Best Director, Best Actor, Best Actress, Best Score\n\
         a,b,c,d,e\n\
         f,g,IGNORED,h,i\n",
        &grid,
    );
    assert_eq!(card.get(2, 2), "");
    assert_eq!(card.get(0, 4), "Best Score");

    let renderer = CardRenderer::new(grid, PageGeometry::letter()).with_titles(["O", "S", "C", "A", "R"]);
    let pdf = renderer.render_pdf(&card, 72).unwrap();
    assert!(pdf.starts_with(b"%PDF-"));
    let needle: &[u8] = b"/MediaBox [0 0 612 792]";
    assert_eq!(pdf.windows(needle.len()).filter(|w| *w == needle).count(), 1);
}

#[test]
fn profile_file_overrides_builtin_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("office.json");
    fs::write(
        &path,
        r#"{"name":"office","column_titles":["W","O","R","K"],"grid":{"rows":4,"columns":4,"reserved":[[0,0],[3,3]]},"style":"ink"}"#,
    )
    .unwrap();
    let profile = CardProfile::load(&path).unwrap();
    assert_eq!(profile.grid.open_cells(), 14);
    assert_eq!(profile.base_name, ProfileRegistry::get("oscar").unwrap().base_name);

    let renderer = profile.renderer().unwrap();
    let corpus = Corpus::from_entries((1..=20).map(|i| format!("task {}", i)));
    let card = fill_with(&corpus, renderer.grid(), &mut StdRng::seed_from_u64(3));
    assert_eq!(card.get(0, 0), "");
    assert_eq!(card.get(3, 3), "");
    assert_eq!(card.values().count(), 14);

    let image = renderer.render_image(&card, 72);
    assert_eq!(image.dimensions(), (612, 792));
}

#[test]
fn invalid_profile_json_is_a_profile_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("broken.json");
    fs::write(&path, r#"{"grid":{"rows":2,"columns":2,"reserved":[[5,5]]}}"#).unwrap();
    assert!(matches!(CardProfile::load(&path), Err(CardError::Profile { .. })));
}
