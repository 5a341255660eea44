use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LessonTeacher {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub teacher_number: String,
    #[serde(default)]
    pub department: Option<String>,
}

impl LessonTeacher {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lesson {
    pub id: String,
    pub name: String,
    pub code: String,
    /// Minutes per lesson hour.
    pub duration: u32,
    /// Absent until a teacher is assigned.
    #[serde(default)]
    pub teacher: Option<LessonTeacher>,
    #[serde(default)]
    pub department: Option<String>,
}

impl Lesson {
    /// `Name (CODE)`, as shown in lesson pickers.
    pub fn picker_label(&self) -> String {
        format!("{} ({})", self.name, self.code)
    }
}
