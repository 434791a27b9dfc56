use serde::{Deserialize, Serialize};

use super::field::{missing_fields, FieldValue};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutritionPlanRequest {
    pub weight: Option<FieldValue>,
    pub height: Option<FieldValue>,
    pub calories: Option<FieldValue>,
    pub diet_type: Option<FieldValue>,
    pub allergies: Option<FieldValue>,
    pub custom_prompt: Option<FieldValue>,
}

impl NutritionPlanRequest {
    pub fn missing_fields(&self) -> Vec<&'static str> {
        missing_fields(&[
            ("weight", self.weight.as_ref()),
            ("height", self.height.as_ref()),
            ("calories", self.calories.as_ref()),
            ("diet_type", self.diet_type.as_ref()),
        ])
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NutritionPlanResult {
    pub plan: String,
    pub bmi: Option<f64>,
    pub bmi_note: String,
}
