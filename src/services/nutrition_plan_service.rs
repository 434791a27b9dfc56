use tracing::{info, instrument};

use crate::models::{FieldValue, NutritionPlanRequest, NutritionPlanResult};
use crate::services::completion_client::{CompletionClient, CompletionOptions};
use crate::services::errors::ServiceError;
use crate::services::response_cleaner::clean_response;

/// Body-mass index from weight in kilograms and height in centimetres,
/// rounded to one decimal. `None` for a zero height.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> Option<f64> {
    if height_cm == 0.0 {
        return None;
    }

    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);

    bmi.is_finite().then(|| (bmi * 10.0).round() / 10.0)
}

pub fn bmi_note(bmi: f64) -> &'static str {
    if bmi < 18.5 {
        "Underweight - Consider increasing calorie intake"
    } else if bmi < 25.0 {
        "Healthy weight - Maintain your balance"
    } else if bmi < 30.0 {
        "Overweight - Consider gradual weight loss"
    } else {
        "Obese - Consult a healthcare professional"
    }
}

/// First letter upper case, the rest lower case
fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

fn optional_or_none(value: Option<&FieldValue>) -> String {
    value
        .filter(|value| !value.is_blank())
        .map(ToString::to_string)
        .unwrap_or_else(|| "none".to_string())
}

fn required_number(value: Option<&FieldValue>, field: &'static str) -> Result<f64, ServiceError> {
    value
        .and_then(FieldValue::as_f64)
        .filter(|number| number.is_finite())
        .ok_or_else(|| ServiceError::invalid(field, "expected a number"))
}

pub fn build_nutrition_prompt(request: &NutritionPlanRequest) -> String {
    let field = |value: Option<&FieldValue>| value.map(ToString::to_string).unwrap_or_default();

    format!(
        "Create a detailed nutrition plan with these specifications:
- Weight: {weight} kg
- Height: {height} cm
- Target Calories: {calories}
- Diet Type: {diet_type}
- Restrictions: {allergies}
- Special Instructions: {custom_prompt}

Format with these exact section headers:
[BMI Analysis] (Just the calculated BMI number and classification and some information/motivation in a sentence)
[Macronutrients] (Protein/Carbs/Fats percentages only)
[Daily Meal Plan] (Breakfast/Lunch/Dinner/Snacks)
[Weekly Diet Plan] (7-day meal overview)
[Grocery List] (Bulleted list)
[Prep Tips] (Numbered steps, also include ways to better diet, for eg: water intake, workouts etc.)

Exclude formulas and explanations. Use clear bullet points.",
        weight = field(request.weight.as_ref()),
        height = field(request.height.as_ref()),
        calories = field(request.calories.as_ref()),
        diet_type = capitalize(&field(request.diet_type.as_ref())),
        allergies = optional_or_none(request.allergies.as_ref()),
        custom_prompt = optional_or_none(request.custom_prompt.as_ref()),
    )
}

#[derive(Debug, Clone)]
pub struct NutritionPlanService {
    completion: CompletionClient,
}

impl NutritionPlanService {
    pub fn new(completion: CompletionClient) -> Self {
        Self { completion }
    }

    /// Validate, prompt the model and attach the BMI analysis
    #[instrument(skip(self, request))]
    pub async fn generate(&self, request: &NutritionPlanRequest) -> Result<NutritionPlanResult, ServiceError> {
        ServiceError::check_required(request.missing_fields())?;
        let weight = required_number(request.weight.as_ref(), "weight")?;
        let height = required_number(request.height.as_ref(), "height")?;

        let prompt = build_nutrition_prompt(request);
        let raw_plan = self
            .completion
            .complete_prompt(&prompt, CompletionOptions::PLAN)
            .await?;

        let bmi = calculate_bmi(weight, height);
        info!(?bmi, "Generated nutrition plan");

        Ok(NutritionPlanResult {
            plan: clean_response(&raw_plan),
            bmi,
            bmi_note: bmi.map(bmi_note).unwrap_or_default().to_string(),
        })
    }
}
