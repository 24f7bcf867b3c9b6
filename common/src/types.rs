//! アノテーションの型定義
//!
//! - AnnotationArea: 画像上の矩形1つと原文/訳文のペア
//! - AnnotationSet: ファイル名 → 領域リスト（挿入順を保持）

/// 画像上の注釈領域
///
/// 領域自体はIDを持たず、所属リスト内の位置が識別子になる。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationArea {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub original: String,     // 原文
    pub translation: String,  // 訳文
}

impl AnnotationArea {
    pub fn new(
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        original: impl Into<String>,
        translation: impl Into<String>,
    ) -> Self {
        Self {
            x,
            y,
            width,
            height,
            original: original.into(),
            translation: translation.into(),
        }
    }
}

/// 1グループ分のアノテーション
///
/// ファイル名は最初に登録された順で並ぶ。上書きしても順序は変わらない。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationSet {
    entries: Vec<(String, Vec<AnnotationArea>)>,
}

impl AnnotationSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// ファイルの領域リストを取得
    pub fn get(&self, file_name: &str) -> Option<&[AnnotationArea]> {
        self.entries
            .iter()
            .find(|(name, _)| name == file_name)
            .map(|(_, areas)| areas.as_slice())
    }

    /// ファイルの領域リストを丸ごと置き換える（部分マージはしない）
    pub fn insert(&mut self, file_name: impl Into<String>, areas: Vec<AnnotationArea>) {
        let file_name = file_name.into();
        match self.entries.iter_mut().find(|(name, _)| *name == file_name) {
            Some((_, existing)) => *existing = areas,
            None => self.entries.push((file_name, areas)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[AnnotationArea])> {
        self.entries
            .iter()
            .map(|(name, areas)| (name.as_str(), areas.as_slice()))
    }

    /// 登録ファイル数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 全ファイルの領域数合計
    pub fn area_count(&self) -> usize {
        self.entries.iter().map(|(_, areas)| areas.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn area(n: u32) -> AnnotationArea {
        AnnotationArea::new(n, n, 10, 10, format!("原文{}", n), format!("訳{}", n))
    }

    #[test]
    fn test_get_unknown_file() {
        let set = AnnotationSet::new();
        assert!(set.get("none.png").is_none());
        assert!(set.is_empty());
    }

    #[test]
    fn test_insert_keeps_first_position() {
        let mut set = AnnotationSet::new();
        set.insert("b.png", vec![area(1)]);
        set.insert("a.png", vec![area(2)]);
        set.insert("b.png", vec![area(3), area(4)]);

        let names: Vec<&str> = set.iter().map(|(name, _)| name).collect();
        assert_eq!(names, vec!["b.png", "a.png"]);
        assert_eq!(set.get("b.png").unwrap(), &[area(3), area(4)]);
        assert_eq!(set.len(), 2);
        assert_eq!(set.area_count(), 3);
    }

    #[test]
    fn test_insert_empty_list_replaces() {
        let mut set = AnnotationSet::new();
        set.insert("p1.png", vec![area(1)]);
        set.insert("p1.png", Vec::new());

        assert_eq!(set.get("p1.png").unwrap().len(), 0);
        assert_eq!(set.len(), 1);
    }
}
