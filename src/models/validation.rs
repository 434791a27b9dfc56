use anyhow::{anyhow, Result};

/// Email validation
pub fn validate_email(email: &str) -> Result<()> {
    if email.is_empty() {
        return Err(anyhow!("Email cannot be empty"));
    }

    if !email.contains('@') || !email.contains('.') {
        return Err(anyhow!("Invalid email format"));
    }

    if email.len() > 120 {
        return Err(anyhow!("Email cannot be longer than 120 characters"));
    }

    Ok(())
}

/// Display name validation
pub fn validate_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        return Err(anyhow!("Name cannot be empty"));
    }

    if name.len() > 100 {
        return Err(anyhow!("Name cannot be longer than 100 characters"));
    }

    Ok(())
}

pub fn validate_age(age: i32) -> Result<()> {
    if !(1..=120).contains(&age) {
        return Err(anyhow!("Age must be between 1 and 120"));
    }
    Ok(())
}

/// Body weight in kilograms
pub fn validate_weight(weight: f64) -> Result<()> {
    if !weight.is_finite() || weight <= 0.0 || weight > 500.0 {
        return Err(anyhow!("Weight must be between 0 and 500 kg"));
    }
    Ok(())
}

pub fn validate_body_fat(body_fat: f64) -> Result<()> {
    if !(0.0..=100.0).contains(&body_fat) {
        return Err(anyhow!("Body fat must be between 0 and 100 percent"));
    }
    Ok(())
}

pub fn validate_sleep_hours(hours: f64) -> Result<()> {
    if !(0.0..=24.0).contains(&hours) {
        return Err(anyhow!("Sleep hours must be between 0 and 24"));
    }
    Ok(())
}

pub fn validate_non_negative(value: i32, field_name: &str) -> Result<()> {
    if value < 0 {
        return Err(anyhow!("{} cannot be negative", field_name));
    }
    Ok(())
}
