use crate::error::{AppError, AppResult, FileError};
use crate::models::content::PainPointBatch;
use std::path::{Path, PathBuf};
use tokio::fs;

/// 从 TOML 文件加载数据并转换为 PainPointBatch 对象
pub async fn load_toml_to_batch(toml_file_path: &Path) -> AppResult<PainPointBatch> {
    let display_path = toml_file_path.display().to_string();
    let content = fs::read_to_string(toml_file_path)
        .await
        .map_err(|e| AppError::file_read_failed(&display_path, e))?;

    let mut batch: PainPointBatch = toml::from_str(&content).map_err(|e| {
        AppError::File(FileError::TomlParseFailed {
            path: display_path.clone(),
            source: e,
        })
    })?;

    // 未填写名称时使用文件名
    if batch.name.trim().is_empty() {
        batch.name = toml_file_path
            .file_stem()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string();
    }
    batch.file_path = Some(display_path);

    Ok(batch)
}

/// 从文件夹中加载所有 TOML 文件并转换为 PainPointBatch 对象列表
///
/// 单个文件加载失败只记录警告，不影响其他文件；结果按文件名排序
pub async fn load_all_toml_files(folder_path: &str) -> AppResult<Vec<PainPointBatch>> {
    let folder = PathBuf::from(folder_path);

    if !folder.exists() {
        return Err(AppError::File(FileError::DirectoryNotFound {
            path: folder_path.to_string(),
        }));
    }

    let mut toml_files = Vec::new();
    let mut entries = fs::read_dir(&folder)
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?;

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| AppError::file_read_failed(folder_path, e))?
    {
        let path = entry.path();
        if path.extension().and_then(|s| s.to_str()) == Some("toml") {
            toml_files.push(path);
        }
    }
    toml_files.sort();

    let mut batches = Vec::new();
    for path in toml_files {
        tracing::info!(
            "正在加载: {}",
            path.file_name().unwrap_or_default().to_string_lossy()
        );

        match load_toml_to_batch(&path).await {
            Ok(batch) => {
                tracing::info!(
                    "成功加载 {} 条痛点文本, {} 个帖子",
                    batch.pain_points.len(),
                    batch.posts.len()
                );
                batches.push(batch);
            }
            Err(e) => {
                tracing::warn!("加载文件失败 {}: {}", path.display(), e);
            }
        }
    }

    Ok(batches)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!(
            "idea_spark_{}_{}",
            name,
            std::process::id()
        ));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[tokio::test]
    async fn test_load_batch_with_posts_and_profile() {
        let dir = temp_dir("load_batch");
        let path = dir.join("freelance.toml");
        std::fs::write(
            &path,
            r#"
pain_points = ["I can't find clients as a freelancer."]

[profile]
interest = "Other"
interest_other = "urban gardening"
skill = "programming"

[[posts]]
title = "Clients ghost me"
content = "Every time I send a quote they vanish."
url = "https://www.reddit.com/r/freelance/1"
score = 12
num_comments = 4

[[targeted_posts]]
title = "Need advice on pricing"
url = "https://www.reddit.com/r/freelance/2"
"#,
        )
        .unwrap();

        let batch = load_toml_to_batch(&path).await.unwrap();
        assert_eq!(batch.name, "freelance");
        assert_eq!(batch.pain_points.len(), 1);
        assert_eq!(batch.posts.len(), 1);
        assert_eq!(batch.posts[0].num_comments, 4);
        let profile = batch.profile.as_ref().unwrap();
        assert_eq!(profile.skill, "programming");
        assert_eq!(profile.resolved_interest(), "urban gardening");
        assert_eq!(batch.targeted_posts.len(), 1);
        assert!(batch.file_path.is_some());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_load_all_skips_broken_files() {
        let dir = temp_dir("load_all");
        std::fs::write(dir.join("a.toml"), "name = \"first\"\npain_points = [\"x\"]\n").unwrap();
        std::fs::write(dir.join("b.toml"), "pain_points = [unterminated").unwrap();
        std::fs::write(dir.join("notes.txt"), "ignored").unwrap();

        let batches = load_all_toml_files(dir.to_str().unwrap()).await.unwrap();
        assert_eq!(batches.len(), 1);
        assert_eq!(batches[0].name, "first");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_missing_folder_is_an_error() {
        let result = load_all_toml_files("/definitely/not/here").await;
        assert!(matches!(
            result,
            Err(AppError::File(FileError::DirectoryNotFound { .. }))
        ));
    }
}
