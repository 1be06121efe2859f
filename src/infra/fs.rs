//! # File System Operations Module / 文件系统操作模块
//!
//! Idempotent, side-effect-only helpers over the suite's on-disk state:
//! output-tree management, result-file appends and directory copies.
//!
//! 针对套件磁盘状态的幂等、纯副作用辅助函数：
//! 输出目录树管理、结果文件追加和目录复制。

use anyhow::{Context, Result};
use fs_extra::dir::{CopyOptions, copy};
use std::fs;
use std::io::Write;
use std::path::Path;

/// Creates a directory and all missing parents. A no-op if it already exists.
/// 创建目录及所有缺失的父目录。目录已存在时为空操作。
pub fn mk_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path)
        .with_context(|| format!("failed to create directory: {}", path.display()))
}

/// Recursively deletes a directory. A no-op if it does not exist.
/// 递归删除目录。目录不存在时为空操作。
pub fn remove_dir(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path)
            .with_context(|| format!("failed to remove directory: {}", path.display()))?;
    }
    Ok(())
}

/// Deletes a file. A no-op if it does not exist.
/// 删除文件。文件不存在时为空操作。
pub fn remove_file(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_file(path)
            .with_context(|| format!("failed to remove file: {}", path.display()))?;
    }
    Ok(())
}

/// Truncates a file to zero length, creating it if missing.
/// 将文件截断为零长度，文件缺失时创建。
pub fn clean_file(path: &Path) -> Result<()> {
    fs::write(path, "").with_context(|| format!("failed to truncate file: {}", path.display()))
}

/// Reads a file as an ordered sequence of lines.
///
/// A missing or unreadable file is an explicit error rather than an empty
/// sequence: silently treating a missing test artifact as "no content" would
/// mask a broken corpus.
///
/// 将文件读取为有序的行序列。
///
/// 缺失或不可读的文件是显式错误而非空序列：
/// 将缺失的测试产物静默地当作"无内容"会掩盖损坏的语料。
pub fn read_lines(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read file: {}", path.display()))?;
    Ok(content.lines().map(str::to_string).collect())
}

/// Writes content to a file, replacing whatever was there.
/// 将内容写入文件，替换原有内容。
pub fn write_file(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("failed to write file: {}", path.display()))
}

/// Appends content to a file, creating it if missing. Not crash-safe: a
/// process interrupted mid-write leaves a partial file.
///
/// 向文件追加内容，文件缺失时创建。不保证崩溃安全：
/// 写入中途被中断的进程会留下不完整的文件。
pub fn write_append(path: &Path, content: &str) -> Result<()> {
    let mut file = fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("failed to open file for append: {}", path.display()))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("failed to append to file: {}", path.display()))
}

/// Moves a file, falling back to copy-and-remove when the rename crosses
/// filesystems.
///
/// 移动文件，当重命名跨越文件系统时回退为复制后删除。
pub fn move_file(src: &Path, dst: &Path) -> Result<()> {
    if fs::rename(src, dst).is_ok() {
        return Ok(());
    }
    fs::copy(src, dst).with_context(|| {
        format!("failed to move {} to {}", src.display(), dst.display())
    })?;
    fs::remove_file(src).with_context(|| format!("failed to remove file: {}", src.display()))
}

/// Copies the entire content of a source directory into a destination
/// directory, overwriting existing files.
///
/// 将源目录的全部内容复制到目标目录，覆盖已存在的文件。
pub fn copy_dir(from: &Path, to: &Path) -> Result<()> {
    let mut options = CopyOptions::new();
    options.overwrite = true;
    options.copy_inside = true;
    copy(from, to, &options).with_context(|| {
        format!("failed to copy {} to {}", from.display(), to.display())
    })?;
    Ok(())
}
