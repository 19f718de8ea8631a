use lopdf::{Dictionary, Document, Object, Stream};
use pdf_compose::*;

/// Build an in-memory PDF whose pages carry a recognizable content marker.
fn create_test_pdf(prefix: &str, num_pages: usize) -> Document {
    let mut doc = Document::with_version("1.7");

    let pages_id = doc.new_object_id();

    let mut kids = Vec::new();
    for i in 0..num_pages {
        let marker = format!("q Q % {prefix}-{i}");
        let content_id = doc.add_object(Stream::new(Dictionary::new(), marker.into_bytes()));

        let page_id = doc.add_object(Dictionary::from_iter(vec![
            ("Type", Object::Name(b"Page".to_vec())),
            ("Parent", Object::Reference(pages_id)),
            (
                "MediaBox",
                Object::Array(vec![
                    Object::Integer(0),
                    Object::Integer(0),
                    Object::Integer(595),
                    Object::Integer(842),
                ]),
            ),
            ("Resources", Object::Dictionary(Dictionary::new())),
            ("Contents", Object::Reference(content_id)),
        ]));
        kids.push(Object::Reference(page_id));
    }

    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(kids)),
        ("Count", Object::Integer(num_pages as i64)),
    ]);
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_id)),
    ]));

    doc.trailer.set("Root", catalog_id);

    doc
}

/// Content stream text of each page, in document order.
fn page_contents(doc: &Document) -> Vec<String> {
    doc.get_pages()
        .values()
        .map(|page_id| {
            let page_dict = doc.get_dictionary(*page_id).unwrap();
            let contents = match page_dict.get(b"Contents") {
                Ok(Object::Reference(id)) => {
                    let stream = doc.get_object(*id).unwrap().as_stream().unwrap();
                    stream
                        .decompressed_content()
                        .unwrap_or_else(|_| stream.content.clone())
                }
                _ => Vec::new(),
            };
            String::from_utf8_lossy(&contents).into_owned()
        })
        .collect()
}

/// /Rotate entry of each page, defaulting to 0.
fn page_rotations(doc: &Document) -> Vec<i64> {
    doc.get_pages()
        .values()
        .map(|page_id| {
            doc.get_dictionary(*page_id)
                .unwrap()
                .get(b"Rotate")
                .ok()
                .and_then(|obj| obj.as_i64().ok())
                .unwrap_or(0)
        })
        .collect()
}

#[test]
fn test_untouched_model_round_trips() {
    let source = create_test_pdf("src", 3);
    let sources = SourceSet::new(source);
    let model = PageComposition::from_original(3);

    let output = assemble_sync(&model, &sources).unwrap();

    assert_eq!(output.get_pages().len(), 3);
    let contents = page_contents(&output);
    assert!(contents[0].contains("src-0"));
    assert!(contents[1].contains("src-1"));
    assert!(contents[2].contains("src-2"));
    assert_eq!(page_rotations(&output), vec![0, 0, 0]);
}

#[test]
fn test_delete_blank_rotate_scenario() {
    // 3 original pages, page 1 deleted, a blank inserted after page 0,
    // page 2 rotated 180: output is [orig-0 @0, blank, orig-2 @180].
    let source = create_test_pdf("src", 3);
    let sources = SourceSet::new(source);

    let mut model = PageComposition::from_original(3);
    model.delete(1).unwrap();
    model.insert_blank(Some(0));
    model.rotate(2, 180).unwrap();

    let output = assemble_sync(&model, &sources).unwrap();

    assert_eq!(output.get_pages().len(), 3);
    let contents = page_contents(&output);
    assert!(contents[0].contains("src-0"));
    assert!(!contents[1].contains("src-"), "blank page has no source content");
    assert!(contents[2].contains("src-2"));
    assert!(!contents.iter().any(|c| c.contains("src-1")));
    assert_eq!(page_rotations(&output), vec![0, 0, 180]);
}

#[test]
fn test_duplicate_repeats_source_page() {
    let source = create_test_pdf("src", 2);
    let sources = SourceSet::new(source);

    let mut model = PageComposition::from_original(2);
    model.duplicate(0).unwrap();

    let output = assemble_sync(&model, &sources).unwrap();
    let contents = page_contents(&output);
    assert_eq!(output.get_pages().len(), 3);
    assert!(contents[0].contains("src-0"));
    assert!(contents[1].contains("src-0"));
    assert!(contents[2].contains("src-1"));
}

#[test]
fn test_reorder_changes_output_order() {
    let source = create_test_pdf("src", 3);
    let sources = SourceSet::new(source);

    let mut model = PageComposition::from_original(3);
    model.reorder(2, 0).unwrap();

    let output = assemble_sync(&model, &sources).unwrap();
    let contents = page_contents(&output);
    assert!(contents[0].contains("src-2"));
    assert!(contents[1].contains("src-0"));
    assert!(contents[2].contains("src-1"));
}

#[test]
fn test_external_pages_merge_in_source_order() {
    let primary = create_test_pdf("a", 2);
    let external = create_test_pdf("b", 2);

    let mut sources = SourceSet::new(primary);
    let external_id = sources.register_external(external);

    let mut model = PageComposition::from_original(2);
    model.insert_from_external(external_id, 2, None);

    let output = assemble_sync(&model, &sources).unwrap();
    let contents = page_contents(&output);
    assert_eq!(output.get_pages().len(), 4);
    assert!(contents[0].contains("a-0"));
    assert!(contents[1].contains("a-1"));
    assert!(contents[2].contains("b-0"));
    assert!(contents[3].contains("b-1"));
}

#[test]
fn test_unknown_external_handle_is_load_error() {
    let sources = SourceSet::new(create_test_pdf("src", 1));

    let mut model = PageComposition::from_original(1);
    model.insert_from_external(DocumentId(42), 1, None);

    assert!(matches!(
        assemble_sync(&model, &sources),
        Err(ComposeError::DocumentLoad(_))
    ));
}

#[test]
fn test_out_of_range_source_page_is_hard_failure() {
    // A record pointing past the source's page count is a contract
    // violation, not a page to skip silently.
    let sources = SourceSet::new(create_test_pdf("src", 2));
    let model = PageComposition::from_original(4);

    assert!(matches!(
        assemble_sync(&model, &sources),
        Err(ComposeError::PageIndex { .. })
    ));
}

#[test]
fn test_everything_deleted_yields_no_pages() {
    let sources = SourceSet::new(create_test_pdf("src", 2));
    let mut model = PageComposition::from_original(2);
    model.delete(0).unwrap();
    model.delete(0).unwrap();

    assert!(matches!(
        assemble_sync(&model, &sources),
        Err(ComposeError::NoPages)
    ));
}

#[test]
fn test_model_is_untouched_by_assembly() {
    let sources = SourceSet::new(create_test_pdf("src", 2));
    let mut model = PageComposition::from_original(2);
    model.rotate(0, 90).unwrap();
    let snapshot = model.clone();

    assemble_sync(&model, &sources).unwrap();
    assert_eq!(model, snapshot);
}

#[tokio::test]
async fn test_async_assembly_and_file_round_trip() {
    use tempfile::TempDir;

    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("input.pdf");
    let output_path = temp_dir.path().join("output.pdf");

    let doc = create_test_pdf("src", 4);
    std::fs::write(&input_path, document_to_bytes(doc).unwrap()).unwrap();

    let loaded = load_pdf(&input_path).await.unwrap();
    assert_eq!(loaded.get_pages().len(), 4);

    let sources = SourceSet::new(loaded);
    let mut model = PageComposition::from_original(4);
    model.delete(3).unwrap();

    let output = assemble(&model, &sources).await.unwrap();
    save_pdf(output, &output_path).await.unwrap();

    let reloaded = load_pdf(&output_path).await.unwrap();
    assert_eq!(reloaded.get_pages().len(), 3);
}

#[tokio::test]
async fn test_load_failure_surfaces_as_document_error() {
    use tempfile::NamedTempFile;

    let temp = NamedTempFile::new().unwrap();
    std::fs::write(temp.path(), b"not a pdf at all").unwrap();

    let result = load_pdf(temp.path()).await;
    assert!(matches!(result, Err(ComposeError::DocumentLoad(_))));
}

#[tokio::test]
async fn test_compose_to_bytes_without_decorations() {
    use pdf_fonts::{FontCache, FontRegistry};

    let sources = SourceSet::new(create_test_pdf("src", 3));
    let mut model = PageComposition::from_original(3);
    model.reorder(0, 2).unwrap();

    let bytes = compose_to_bytes(
        AssemblySource::Sequence(model),
        &sources,
        &DecorationOptions::default(),
        &FontRegistry::default(),
        &FontCache::new(),
    )
    .await
    .unwrap();

    let reloaded = Document::load_mem(&bytes).unwrap();
    assert_eq!(reloaded.get_pages().len(), 3);
}

#[tokio::test]
async fn test_compose_to_bytes_from_operation_log() {
    use pdf_fonts::{FontCache, FontRegistry};

    let sources = SourceSet::new(create_test_pdf("src", 3));
    let mut log = OperationLog::new();
    log.push(EditOp::Delete { index: 0 });

    let bytes = compose_to_bytes(
        AssemblySource::Log {
            log,
            original_pages: 3,
        },
        &sources,
        &DecorationOptions::default(),
        &FontRegistry::default(),
        &FontCache::new(),
    )
    .await
    .unwrap();

    let reloaded = Document::load_mem(&bytes).unwrap();
    assert_eq!(reloaded.get_pages().len(), 2);
}
