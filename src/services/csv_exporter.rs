//! 每主题 CSV 导出服务 - 业务能力层
//!
//! 只负责"写一个主题的 CSV 文件"能力，不关心抓取流程

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::{Config, ExportSchema};
use crate::error::FileError;
use crate::models::{QuestionRecord, TopicSpec};

/// 简单列模式的一行（原样对应记录字段）
#[derive(Debug, Serialize, Deserialize)]
struct SimpleRow {
    #[serde(rename = "Category")]
    category: String,
    #[serde(rename = "Question")]
    question: String,
    #[serde(rename = "Option A")]
    option_a: String,
    #[serde(rename = "Option B")]
    option_b: String,
    #[serde(rename = "Option C")]
    option_c: String,
    #[serde(rename = "Option D")]
    option_d: String,
    #[serde(rename = "Correct Answer")]
    correct_answer: String,
    #[serde(rename = "Explanation")]
    explanation: String,
}

impl SimpleRow {
    fn from_record(record: &QuestionRecord) -> Self {
        Self {
            category: record.category_name.clone(),
            question: record.question_text.clone(),
            option_a: record.options[0].clone(),
            option_b: record.options[1].clone(),
            option_c: record.options[2].clone(),
            option_d: record.options[3].clone(),
            correct_answer: record.correct_answer.clone(),
            explanation: record.explanation.clone(),
        }
    }

    fn into_record(self) -> QuestionRecord {
        QuestionRecord {
            category_name: self.category,
            question_text: self.question,
            options: [self.option_a, self.option_b, self.option_c, self.option_d],
            correct_answer: self.correct_answer,
            explanation: self.explanation,
        }
    }
}

/// 数据库列模式的一行（带默认值列，id 每主题从 1 开始）
#[derive(Debug, Serialize, Deserialize)]
struct DatabaseRow {
    id: usize,
    category_id: String,
    question_text: String,
    option_a: String,
    option_b: String,
    option_c: String,
    option_d: String,
    correct_answer: String,
    explanation: String,
    difficulty: String,
    marks: u32,
    is_active: u8,
    created_by: String,
    created_at: String,
}

impl DatabaseRow {
    fn from_record(id: usize, record: &QuestionRecord, created_at: &str) -> Self {
        Self {
            id,
            category_id: record.category_name.clone(),
            question_text: record.question_text.clone(),
            option_a: record.options[0].clone(),
            option_b: record.options[1].clone(),
            option_c: record.options[2].clone(),
            option_d: record.options[3].clone(),
            correct_answer: record.correct_answer.clone(),
            explanation: record.explanation.clone(),
            difficulty: "Medium".to_string(),
            marks: 1,
            is_active: 1,
            created_by: "system".to_string(),
            created_at: created_at.to_string(),
        }
    }

    fn into_record(self) -> QuestionRecord {
        QuestionRecord {
            category_name: self.category_id,
            question_text: self.question_text,
            options: [self.option_a, self.option_b, self.option_c, self.option_d],
            correct_answer: self.correct_answer,
            explanation: self.explanation,
        }
    }
}

/// 每主题 CSV 导出服务
///
/// 职责：
/// - 一个主题一个文件，文件名来自主题名（小写、空格转下划线）
/// - 支持两种列模式（简单列 / 数据库列）
/// - 支持读回文件重建记录（模式专属的默认值列除外）
pub struct CsvExporter {
    output_dir: String,
    schema: ExportSchema,
}

impl CsvExporter {
    /// 创建新的导出服务
    pub fn new(config: &Config) -> Self {
        Self {
            output_dir: config.output_dir.clone(),
            schema: config.export_schema,
        }
    }

    /// 使用自定义输出目录与列模式创建
    pub fn with_options(output_dir: impl Into<String>, schema: ExportSchema) -> Self {
        Self {
            output_dir: output_dir.into(),
            schema,
        }
    }

    /// 将一个主题的全部记录写入 CSV 文件
    ///
    /// # 返回
    /// 返回写入的文件路径
    pub fn export(
        &self,
        topic: &TopicSpec,
        records: &[QuestionRecord],
    ) -> Result<PathBuf, FileError> {
        fs::create_dir_all(&self.output_dir).map_err(|e| FileError::CreateDirFailed {
            path: self.output_dir.clone(),
            source: e,
        })?;

        let path = Path::new(&self.output_dir).join(format!("{}.csv", topic.file_stem()));
        debug!("写入 CSV: {}", path.display());

        let mut writer = csv::Writer::from_path(&path).map_err(|e| FileError::CsvFailed {
            path: path.display().to_string(),
            source: e,
        })?;

        match self.schema {
            ExportSchema::Simple => {
                for record in records {
                    writer
                        .serialize(SimpleRow::from_record(record))
                        .map_err(|e| FileError::CsvFailed {
                            path: path.display().to_string(),
                            source: e,
                        })?;
                }
            }
            ExportSchema::Database => {
                let created_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
                for (index, record) in records.iter().enumerate() {
                    writer
                        .serialize(DatabaseRow::from_record(index + 1, record, &created_at))
                        .map_err(|e| FileError::CsvFailed {
                            path: path.display().to_string(),
                            source: e,
                        })?;
                }
            }
        }

        writer.flush().map_err(|e| FileError::WriteFailed {
            path: path.display().to_string(),
            source: e,
        })?;

        Ok(path)
    }

    /// 读回 CSV 文件并重建记录（用于校验导出结果）
    pub fn read_records(&self, path: &Path) -> Result<Vec<QuestionRecord>, FileError> {
        let mut reader = csv::Reader::from_path(path).map_err(|e| FileError::CsvFailed {
            path: path.display().to_string(),
            source: e,
        })?;

        let mut records = Vec::new();
        match self.schema {
            ExportSchema::Simple => {
                for row in reader.deserialize::<SimpleRow>() {
                    let row = row.map_err(|e| FileError::CsvFailed {
                        path: path.display().to_string(),
                        source: e,
                    })?;
                    records.push(row.into_record());
                }
            }
            ExportSchema::Database => {
                for row in reader.deserialize::<DatabaseRow>() {
                    let row = row.map_err(|e| FileError::CsvFailed {
                        path: path.display().to_string(),
                        source: e,
                    })?;
                    records.push(row.into_record());
                }
            }
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DEFAULT_EXPLANATION, MISSING_VALUE};

    fn sample_record(n: usize) -> QuestionRecord {
        QuestionRecord {
            category_name: "Percentages".to_string(),
            question_text: format!("What is {}% of 200?", n),
            options: [
                "10".to_string(),
                "20".to_string(),
                MISSING_VALUE.to_string(),
                "40".to_string(),
            ],
            correct_answer: "B".to_string(),
            explanation: DEFAULT_EXPLANATION.to_string(),
        }
    }

    fn temp_dir(name: &str) -> String {
        let dir = std::env::temp_dir().join(format!("quiz_scrape_{}", name));
        dir.display().to_string()
    }

    #[test]
    fn test_simple_schema_round_trip() {
        let exporter = CsvExporter::with_options(temp_dir("simple"), ExportSchema::Simple);
        let topic = TopicSpec::new("Percentages", 1);
        let records = vec![sample_record(1), sample_record(2)];

        let path = exporter.export(&topic, &records).unwrap();
        assert!(path.ends_with("percentages.csv"));

        let read_back = exporter.read_records(&path).unwrap();
        assert_eq!(read_back, records);
    }

    #[test]
    fn test_database_schema_round_trip() {
        let exporter = CsvExporter::with_options(temp_dir("database"), ExportSchema::Database);
        let topic = TopicSpec::new("Problems on Trains", 1);
        let records = vec![sample_record(1), sample_record(2), sample_record(3)];

        let path = exporter.export(&topic, &records).unwrap();
        assert!(path.ends_with("problems_on_trains.csv"));

        // 模式专属的默认值列不参与重建，记录字段必须一致
        let read_back = exporter.read_records(&path).unwrap();
        assert_eq!(read_back, records);
    }

    #[test]
    fn test_export_empty_topic() {
        // 跳过全部页面的主题也会产出文件，读回为空列表
        let exporter = CsvExporter::with_options(temp_dir("empty"), ExportSchema::Simple);
        let topic = TopicSpec::new("Boats and Streams", 2);

        let path = exporter.export(&topic, &[]).unwrap();
        let read_back = exporter.read_records(&path).unwrap();
        assert!(read_back.is_empty());
    }
}
