//! エクスポートとシナリオの統合テスト
//!
//! 作成 → 保存 → エクスポート → 名前変更 → 削除 の一連の流れを検証

use comic_translator::common::{AnnotationArea, EXPORT_CONTENT_TYPE, EXPORT_FILE_NAME};
use comic_translator::error::TranslatorError;
use comic_translator::GroupRegistry;
use tempfile::tempdir;

#[tokio::test]
async fn test_chapter_scenario() {
    let dir = tempdir().expect("Failed to create temp dir");
    let registry = GroupRegistry::load_all(dir.path()).await.unwrap();
    let area = AnnotationArea::new(10, 20, 30, 40, "你好", "Hello");

    registry.create_group("ch1").await.expect("作成失敗");
    registry
        .set_areas("ch1", "p1.png", vec![area.clone()])
        .await
        .expect("保存失敗");
    assert_eq!(registry.get_areas("ch1", "p1.png").await, vec![area.clone()]);

    let report = registry.export_group("ch1").await.expect("エクスポート失敗");
    assert!(report.contains("区域 1"));
    assert!(report.contains("位置: 10px, 20px 尺寸: 30x40"));
    assert!(report.contains("原文: 你好"));
    assert!(report.contains("翻译: Hello"));

    registry.rename_group("ch1", "chapter1").await.expect("名前変更失敗");
    assert_eq!(registry.get_areas("chapter1", "p1.png").await, vec![area.clone()]);
    assert!(registry.get_areas("ch1", "p1.png").await.is_empty());
    assert!(matches!(
        registry.export_group("ch1").await.unwrap_err(),
        TranslatorError::NotFound(_)
    ));

    registry.delete_group("chapter1").await.expect("削除失敗");
    assert!(registry.get_areas("chapter1", "p1.png").await.is_empty());
    assert!(!registry.list_groups().await.unwrap().contains("chapter1"));
}

#[tokio::test]
async fn test_export_all_sorted_by_group() {
    let dir = tempdir().expect("Failed to create temp dir");
    let registry = GroupRegistry::load_all(dir.path()).await.unwrap();

    registry.create_group("b").await.unwrap();
    registry.create_group("a").await.unwrap();
    registry
        .set_areas("b", "p2.png", vec![AnnotationArea::new(1, 2, 3, 4, "二", "two")])
        .await
        .unwrap();
    registry
        .set_areas("b", "p1.png", vec![AnnotationArea::new(5, 6, 7, 8, "一", "one")])
        .await
        .unwrap();

    let report = registry.export_all().await;

    let a_pos = report.find("=== 分组 [a] ===").expect("aが無い");
    let b_pos = report.find("=== 分组 [b] ===").expect("bが無い");
    assert!(a_pos < b_pos);

    // ファイルは登録順
    let p2_pos = report.find("--- 文件: p2.png ---").unwrap();
    let p1_pos = report.find("--- 文件: p1.png ---").unwrap();
    assert!(p2_pos < p1_pos);
}

#[tokio::test]
async fn test_export_empty_group() {
    let dir = tempdir().expect("Failed to create temp dir");
    let registry = GroupRegistry::load_all(dir.path()).await.unwrap();
    registry.create_group("empty").await.unwrap();

    let report = registry.export_group("empty").await.unwrap();
    assert_eq!(report, "=== 分组 [empty] ===\n");
}

#[test]
fn test_download_constants() {
    assert_eq!(EXPORT_FILE_NAME, "translations.txt");
    assert_eq!(EXPORT_CONTENT_TYPE, "text/plain");
}
