// Reshapes the wide block of repeated task columns into contract table rows
use super::fields;
use crate::config::{Locale, TaskField, TaskLayout};
use crate::error::{EngineError, Result};
use indexmap::IndexSet;
use regex::Regex;
use shared::models::{LineItem, RawRow};
use shared::utils::present_rounded;

/// Column positions of one task slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotColumns {
    pub discipline: usize,
    pub learning_form: usize,
    pub services: usize,
    pub hours: usize,
    pub hour_price: usize,
    pub total: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TaskBlock {
    pub line_items: Vec<LineItem>,
    /// Distinct learning forms, first-seen order, joined by ", ".
    pub learning_form: String,
    /// Disciplines of all line items in table order, joined by ", ".
    pub all_disciplines: String,
}

pub struct TaskReshaper {
    slot_count: usize,
    slot_width: usize,
    patterns: Vec<(TaskField, Regex)>,
    locale: Locale,
}

impl TaskReshaper {
    pub fn new(layout: &TaskLayout, locale: Locale) -> Result<Self> {
        layout.validate()?;
        Ok(TaskReshaper {
            slot_count: layout.slot_count,
            slot_width: layout.slot_width(),
            patterns: layout.compile()?,
            locale,
        })
    }

    fn field_of(&self, header: &str) -> Option<TaskField> {
        self.patterns
            .iter()
            .find(|(_, re)| re.is_match(header))
            .map(|(field, _)| *field)
    }

    /// Finds the task columns in the header and splits them into slots.
    /// Every slot must repeat the fields in layout order.
    pub fn locate(&self, headers: &[String]) -> Result<Vec<SlotColumns>> {
        let matched: Vec<(usize, TaskField)> = headers
            .iter()
            .enumerate()
            .filter_map(|(idx, h)| self.field_of(h).map(|f| (idx, f)))
            .collect();

        let width = self.slot_width;
        if matched.len() != self.slot_count * width {
            return Err(EngineError::TaskBlockMisaligned(format!(
                "found {} task columns, expected {} slots of {}",
                matched.len(),
                self.slot_count,
                width
            )));
        }

        matched
            .chunks(width)
            .enumerate()
            .map(|(slot, chunk)| self.slot_columns(slot + 1, chunk, headers))
            .collect()
    }

    fn slot_columns(
        &self,
        slot: usize,
        chunk: &[(usize, TaskField)],
        headers: &[String],
    ) -> Result<SlotColumns> {
        let position = |wanted: TaskField, at: usize| -> Result<usize> {
            let (idx, found) = chunk[at];
            if found != wanted {
                return Err(EngineError::TaskBlockMisaligned(format!(
                    "slot {} column '{}' is {:?}, expected {:?}",
                    slot, headers[idx], found, wanted
                )));
            }
            Ok(idx)
        };
        let order: Vec<TaskField> = self.patterns.iter().map(|(f, _)| *f).collect();
        let mut columns = SlotColumns {
            discipline: 0,
            learning_form: 0,
            services: 0,
            hours: 0,
            hour_price: 0,
            total: 0,
        };
        for (at, field) in order.into_iter().enumerate() {
            let idx = position(field, at)?;
            match field {
                TaskField::Discipline => columns.discipline = idx,
                TaskField::LearningForm => columns.learning_form = idx,
                TaskField::Services => columns.services = idx,
                TaskField::Hours => columns.hours = idx,
                TaskField::HourPrice => columns.hour_price = idx,
                TaskField::Total => columns.total = idx,
            }
        }
        Ok(columns)
    }

    pub fn reshape(&self, row: &RawRow, slots: &[SlotColumns]) -> Result<TaskBlock> {
        let mut line_items = Vec::new();
        let mut forms: IndexSet<&str> = IndexSet::new();

        for slot in slots {
            // Sparse sheet: unused slots have no discipline
            let Some(discipline) = row.cell_at(slot.discipline) else {
                continue;
            };
            let group = row.cell_at(slot.learning_form).unwrap_or_default();
            forms.insert(self.learning_form(row, group)?);

            line_items.push(LineItem {
                number: line_items.len() + 1,
                discipline: discipline.to_string(),
                group_number: group.to_string(),
                services: row.cell_at(slot.services).unwrap_or_default().to_string(),
                hours: present_rounded(fields::required_number_at(row, slot.hours)?),
                hour_price: present_rounded(fields::required_number_at(row, slot.hour_price)?),
                total_for_service: present_rounded(fields::required_number_at(row, slot.total)?),
            });
        }

        let all_disciplines = line_items
            .iter()
            .map(|item| item.discipline.as_str())
            .collect::<Vec<_>>()
            .join(", ");

        Ok(TaskBlock {
            learning_form: forms.into_iter().collect::<Vec<_>>().join(", "),
            all_disciplines,
            line_items,
        })
    }

    /// "Очная, группа 101" -> "очной"
    fn learning_form(&self, row: &RawRow, group: &str) -> Result<&str> {
        let token = group.split([',', ' ']).next().unwrap_or_default().to_lowercase();
        self.locale
            .learning_form(&token)
            .ok_or(EngineError::UnknownLearningForm {
                row: row.line,
                token,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::Number;
    use std::sync::Arc;

    const SLOT_HEADERS: [&str; 6] = [
        "Дисциплина/практика",
        "Форма обучения, группа",
        "Перечень услуг",
        "Объем услуг, ак. час",
        "Цена за 1 ак. час, руб",
        "Всего",
    ];

    fn headers(slots: usize) -> Vec<String> {
        let mut headers = vec!["Краткое ФИО исполнителя".to_string(), "Всего часов".to_string()];
        for slot in 0..slots {
            for h in SLOT_HEADERS {
                headers.push(if slot == 0 { h.to_string() } else { format!("{}.{}", h, slot) });
            }
        }
        headers
    }

    fn reshaper(slot_count: usize) -> TaskReshaper {
        let layout = TaskLayout {
            slot_count,
            ..TaskLayout::default()
        };
        TaskReshaper::new(&layout, Locale::russian()).unwrap()
    }

    fn row(slots: &[[&str; 6]]) -> RawRow {
        let headers: Arc<[String]> = headers(slots.len()).into();
        let mut cells = vec!["Иванов И.И.".to_string(), "10".to_string()];
        for slot in slots {
            cells.extend(slot.iter().map(|c| c.to_string()));
        }
        RawRow::new(5, headers, cells)
    }

    const EMPTY: [&str; 6] = ["", "", "", "", "", ""];

    #[test]
    fn test_locate_finds_slots_in_order() {
        let r = reshaper(2);
        let slots = r.locate(&headers(2)).unwrap();
        assert_eq!(slots.len(), 2);
        assert_eq!(slots[0].discipline, 2);
        assert_eq!(slots[0].total, 7);
        assert_eq!(slots[1].discipline, 8);
        assert_eq!(slots[1].total, 13);
    }

    #[test]
    fn test_locate_rejects_wrong_slot_count() {
        let err = reshaper(4).locate(&headers(3)).unwrap_err();
        assert!(matches!(err, EngineError::TaskBlockMisaligned(_)));
    }

    #[test]
    fn test_locate_rejects_reordered_columns() {
        let mut h = headers(2);
        h.swap(10, 11);
        let err = reshaper(2).locate(&h).unwrap_err();
        assert!(err.to_string().contains("slot 2"));
    }

    #[test]
    fn test_empty_slots_are_skipped_and_numbering_has_no_gaps() {
        let r = reshaper(4);
        let row = row(&[
            EMPTY,
            ["Экономика", "очная, группа А", "лекции", "10.0", "500", "5000"],
            EMPTY,
            ["Право", "заочная группа Б", "семинары", "10,25", "450,5", "4617,6"],
        ]);
        let slots = r.locate(&row.headers).unwrap();
        let block = r.reshape(&row, &slots).unwrap();

        assert_eq!(block.line_items.len(), 2);
        assert_eq!(block.line_items[0].number, 1);
        assert_eq!(block.line_items[1].number, 2);
        assert_eq!(block.line_items[0].hours, Number::Integer(10));
        assert_eq!(block.line_items[1].hours, Number::Decimal(10.3));
        assert_eq!(block.line_items[1].hour_price, Number::Decimal(450.5));
        assert_eq!(block.line_items[1].group_number, "заочная группа Б");
        assert_eq!(block.all_disciplines, "Экономика, Право");
        assert_eq!(block.learning_form, "очной, заочной");
    }

    #[test]
    fn test_learning_forms_are_deduplicated() {
        let r = reshaper(2);
        let row = row(&[
            ["Экономика", "очная, группа А", "лекции", "2", "500", "1000"],
            ["Экономика", "Очная группа Б", "лекции", "2", "500", "1000"],
        ]);
        let slots = r.locate(&row.headers).unwrap();
        let block = r.reshape(&row, &slots).unwrap();
        assert_eq!(block.learning_form, "очной");
        assert_eq!(block.all_disciplines, "Экономика, Экономика");
    }

    #[test]
    fn test_hyphenated_form_is_one_token() {
        let r = reshaper(1);
        let row = row(&[["Право", "очно-заочная, гр. 3", "лекции", "1", "1", "1"]]);
        let slots = r.locate(&row.headers).unwrap();
        assert_eq!(r.reshape(&row, &slots).unwrap().learning_form, "очно-заочной");
    }

    #[test]
    fn test_unknown_learning_form_names_row() {
        let r = reshaper(1);
        let row = row(&[["Право", "вечерняя, гр. 3", "лекции", "1", "1", "1"]]);
        let slots = r.locate(&row.headers).unwrap();
        match r.reshape(&row, &slots).unwrap_err() {
            EngineError::UnknownLearningForm { row, token } => {
                assert_eq!(row, 5);
                assert_eq!(token, "вечерняя");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_kept_slot_needs_numbers() {
        let r = reshaper(1);
        let row = row(&[["Право", "очная", "лекции", "", "1", "1"]]);
        let slots = r.locate(&row.headers).unwrap();
        assert!(matches!(
            r.reshape(&row, &slots),
            Err(EngineError::MissingValue { row: 5, .. })
        ));
    }

    #[test]
    fn test_all_slots_empty_gives_empty_block() {
        let r = reshaper(2);
        let row = row(&[EMPTY, EMPTY]);
        let slots = r.locate(&row.headers).unwrap();
        let block = r.reshape(&row, &slots).unwrap();
        assert!(block.line_items.is_empty());
        assert_eq!(block.learning_form, "");
        assert_eq!(block.all_disciplines, "");
    }
}
