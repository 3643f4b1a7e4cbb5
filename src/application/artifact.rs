//! Audio Artifact - 单次调用独占的临时音频文件
//!
//! 文件名由 tempfile 随机生成，并发调用之间不会冲突；
//! 值被 drop 时文件即被删除，覆盖成功、失败、panic 与取消等所有退出路径。

use std::io;
use std::path::{Path, PathBuf};

use tempfile::{Builder, NamedTempFile};

use crate::domain::AudioFormat;

const ARTIFACT_PREFIX: &str = "speech-";

/// 临时音频文件
#[derive(Debug)]
pub struct AudioArtifact {
    file: NamedTempFile,
    format: AudioFormat,
}

impl AudioArtifact {
    /// 在指定目录下创建唯一命名的临时文件
    pub fn create_in(dir: impl AsRef<Path>, format: AudioFormat) -> io::Result<Self> {
        let suffix = format!(".{}", format.extension());
        let file = Builder::new()
            .prefix(ARTIFACT_PREFIX)
            .suffix(&suffix)
            .tempfile_in(dir)?;

        tracing::debug!(path = %file.path().display(), "Audio artifact created");

        Ok(Self { file, format })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn format(&self) -> AudioFormat {
        self.format
    }

    /// 获取一个指向同一文件的异步写入句柄
    ///
    /// 句柄复制自已打开的描述符，不会按路径重新创建文件。
    pub fn writer(&self) -> io::Result<tokio::fs::File> {
        let file = self.file.as_file().try_clone()?;
        Ok(tokio::fs::File::from_std(file))
    }

    /// 显式删除文件并返回删除结果
    pub fn release(self) -> io::Result<PathBuf> {
        let path = self.file.path().to_path_buf();
        self.file.close()?;
        tracing::debug!(path = %path.display(), "Audio artifact released");
        Ok(path)
    }
}
