// Layout of the repeated task columns: which headers belong to a slot and in what order
use crate::error::{EngineError, Result};
use regex::Regex;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TaskField {
    Discipline,
    LearningForm,
    Services,
    Hours,
    HourPrice,
    Total,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TaskFieldPattern {
    pub field: TaskField,
    /// Regex searched in the header text.
    pub pattern: String,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct TaskLayout {
    pub slot_count: usize,
    /// One entry per field, in the order the columns repeat inside a slot.
    pub fields: Vec<TaskFieldPattern>,
}

impl Default for TaskLayout {
    fn default() -> Self {
        let fields = [
            (TaskField::Discipline, r"^Дисциплина/"),
            (TaskField::LearningForm, r"Форма обучения"),
            (TaskField::Services, r"Перечень услуг"),
            (TaskField::Hours, r"Объем услуг"),
            (TaskField::HourPrice, r"Цена за 1 ак\. час"),
            (TaskField::Total, r"^Всего[.\d]*$"),
        ];
        TaskLayout {
            slot_count: 4,
            fields: fields
                .iter()
                .map(|(field, pattern)| TaskFieldPattern {
                    field: *field,
                    pattern: pattern.to_string(),
                })
                .collect(),
        }
    }
}

impl TaskLayout {
    pub fn slot_width(&self) -> usize {
        self.fields.len()
    }

    pub fn validate(&self) -> Result<()> {
        if self.slot_count == 0 {
            return Err(EngineError::ConfigError("task slot_count must be positive".into()));
        }
        let all = [
            TaskField::Discipline,
            TaskField::LearningForm,
            TaskField::Services,
            TaskField::Hours,
            TaskField::HourPrice,
            TaskField::Total,
        ];
        for field in all {
            let count = self.fields.iter().filter(|f| f.field == field).count();
            if count != 1 {
                return Err(EngineError::ConfigError(format!(
                    "task layout must name {:?} exactly once, found {}",
                    field, count
                )));
            }
        }
        self.compile().map(|_| ())
    }

    pub fn compile(&self) -> Result<Vec<(TaskField, Regex)>> {
        self.fields
            .iter()
            .map(|f| {
                Regex::new(&f.pattern)
                    .map(|re| (f.field, re))
                    .map_err(|e| {
                        EngineError::ConfigError(format!("bad pattern for {:?}: {}", f.field, e))
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_is_valid() {
        let layout = TaskLayout::default();
        assert!(layout.validate().is_ok());
        assert_eq!(layout.slot_width(), 6);
    }

    #[test]
    fn test_total_pattern_skips_scalar_totals() {
        let compiled = TaskLayout::default().compile().unwrap();
        let (_, total) = compiled.iter().find(|(f, _)| *f == TaskField::Total).unwrap();
        assert!(total.is_match("Всего"));
        assert!(total.is_match("Всего.3"));
        assert!(!total.is_match("Всего часов"));
        assert!(!total.is_match("Всего денег"));
    }

    #[test]
    fn test_duplicate_field_is_rejected() {
        let mut layout = TaskLayout::default();
        layout.fields[1].field = TaskField::Discipline;
        assert!(layout.validate().is_err());
    }

    #[test]
    fn test_invalid_regex_is_rejected() {
        let mut layout = TaskLayout::default();
        layout.fields[0].pattern = "(".to_string();
        assert!(matches!(layout.validate(), Err(EngineError::ConfigError(_))));
    }
}
