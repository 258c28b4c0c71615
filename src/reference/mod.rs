//! 参照画像ライブラリ
//!
//! ルート直下のサブフォルダ1つを1カテゴリとして扱い、
//! その直下の画像ファイル（png/jpg/jpeg、大文字小文字不問）を参照画像とする。

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// カテゴリ名 → 参照画像パス（ファイル名順）
#[derive(Debug, Clone, Default)]
pub struct ReferenceLibrary {
    categories: BTreeMap<String, Vec<PathBuf>>,
}

impl ReferenceLibrary {
    pub fn new(categories: BTreeMap<String, Vec<PathBuf>>) -> Self {
        Self { categories }
    }

    /// カテゴリの参照画像。未登録カテゴリは空
    pub fn references(&self, category: &str) -> &[PathBuf] {
        self.categories
            .get(category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 比較に使う参照画像（常に先頭の1枚）
    pub fn primary_reference(&self, category: &str) -> Option<&Path> {
        self.references(category).first().map(PathBuf::as_path)
    }

    pub fn contains(&self, category: &str) -> bool {
        self.categories.contains_key(category)
    }

    /// カテゴリ名（名前順）
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.categories.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[PathBuf])> {
        self.categories
            .iter()
            .map(|(name, paths)| (name.as_str(), paths.as_slice()))
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// 参照画像フォルダを走査
///
/// ルートが存在しない・空の場合もエラーにせず空のライブラリを返す。
/// 画像が1枚もないカテゴリも空エントリとして残す。
pub fn load_categories(root: &Path) -> ReferenceLibrary {
    let mut categories = BTreeMap::new();

    if !root.is_dir() {
        debug!(root = %root.display(), "reference directory not found");
        return ReferenceLibrary::new(categories);
    }

    for entry in WalkDir::new(root)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        // シンボリックリンク先のフォルダもカテゴリとして扱う
        if !entry.path().is_dir() {
            continue;
        }

        let name = entry.file_name().to_string_lossy().to_string();
        let images = scan_category(entry.path());
        debug!(category = %name, images = images.len(), "loaded reference category");
        categories.insert(name, images);
    }

    ReferenceLibrary::new(categories)
}

fn scan_category(folder: &Path) -> Vec<PathBuf> {
    WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1) // 直下のみ（再帰しない）
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.path().is_file() && is_image_file(e.path()))
        .map(|e| e.into_path())
        .collect()
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}
