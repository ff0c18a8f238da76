//! Option lists for the state, model-year and make pickers

use chrono::Datelike;

/// Oldest model year offered
pub const FIRST_MODEL_YEAR: i32 = 1900;

const US_STATES: [&str; 51] = [
    "Alabama",
    "Alaska",
    "Arizona",
    "Arkansas",
    "California",
    "Colorado",
    "Connecticut",
    "Delaware",
    "District of Columbia",
    "Florida",
    "Georgia",
    "Hawaii",
    "Idaho",
    "Illinois",
    "Indiana",
    "Iowa",
    "Kansas",
    "Kentucky",
    "Louisiana",
    "Maine",
    "Maryland",
    "Massachusetts",
    "Michigan",
    "Minnesota",
    "Mississippi",
    "Missouri",
    "Montana",
    "Nebraska",
    "Nevada",
    "New Hampshire",
    "New Jersey",
    "New Mexico",
    "New York",
    "North Carolina",
    "North Dakota",
    "Ohio",
    "Oklahoma",
    "Oregon",
    "Pennsylvania",
    "Rhode Island",
    "South Carolina",
    "South Dakota",
    "Tennessee",
    "Texas",
    "Utah",
    "Vermont",
    "Virginia",
    "Washington",
    "West Virginia",
    "Wisconsin",
    "Wyoming",
];

const VEHICLE_MAKES: [&str; 30] = [
    "Acura",
    "Alfa Romeo",
    "Audi",
    "BMW",
    "Buick",
    "Cadillac",
    "Chevrolet",
    "Chrysler",
    "Datsun",
    "Dodge",
    "Ferrari",
    "Fiat",
    "Ford",
    "GMC",
    "Honda",
    "Hyundai",
    "Jeep",
    "Kia",
    "Lexus",
    "Mazda",
    "Mercedes-Benz",
    "Mitsubishi",
    "Nissan",
    "Oldsmobile",
    "Plymouth",
    "Pontiac",
    "Porsche",
    "Subaru",
    "Toyota",
    "Volkswagen",
];

pub fn us_states() -> Vec<String> {
    US_STATES.iter().map(|s| s.to_string()).collect()
}

pub fn vehicle_makes() -> Vec<String> {
    let mut makes: Vec<String> = VEHICLE_MAKES.iter().map(|s| s.to_string()).collect();
    makes.push("Other".to_string());
    makes
}

/// Model years from `newest` down to [`FIRST_MODEL_YEAR`]
pub fn model_years(newest: i32) -> Vec<String> {
    (FIRST_MODEL_YEAR..=newest).rev().map(|y| y.to_string()).collect()
}

/// Model years ending with next year's models
pub fn current_model_years() -> Vec<String> {
    model_years(chrono::Local::now().year() + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_states_include_dc() {
        let states = us_states();
        assert_eq!(states.len(), 51);
        assert!(states.contains(&"District of Columbia".to_string()));
        let mut sorted = states.clone();
        sorted.sort();
        assert_eq!(states, sorted);
    }

    #[test]
    fn test_model_years_descend() {
        let years = model_years(1903);
        assert_eq!(years, vec!["1903", "1902", "1901", "1900"]);
        assert!(model_years(1899).is_empty());
    }

    #[test]
    fn test_current_model_years_start_next_year() {
        let years = current_model_years();
        let next = (chrono::Local::now().year() + 1).to_string();
        assert_eq!(years.first(), Some(&next));
        assert_eq!(years.last().map(String::as_str), Some("1900"));
    }

    #[test]
    fn test_makes_end_with_other() {
        let makes = vehicle_makes();
        assert_eq!(makes.last().map(String::as_str), Some("Other"));
        assert!(makes.contains(&"Ford".to_string()));
    }
}
