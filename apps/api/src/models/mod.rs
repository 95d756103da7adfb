pub mod resume;

pub use resume::{EducationEntry, ExperienceEntry, PersonalInfo, ResumeData};
