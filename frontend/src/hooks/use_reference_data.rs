use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use shared::{BusinessStream, City, EducationLevel, Hobby, Profession};

use crate::services::api::ApiClient;
use crate::services::logging::Logger;

/// Reference lists every form needs for its dropdowns.
///
/// Each list is fetched independently on mount; a failed fetch leaves that
/// list empty rather than failing the whole form. Nothing is cached across
/// mounts.
#[derive(Clone, PartialEq, Default)]
pub struct ReferenceData {
    pub hobbies: Vec<Hobby>,
    pub cities: Vec<City>,
    pub education_levels: Vec<EducationLevel>,
    pub professions: Vec<Profession>,
    pub business_streams: Vec<BusinessStream>,
    pub loading: bool,
}

impl ReferenceData {
    /// Cities matching a pincode, in reference-list order.
    pub fn cities_for_pincode(&self, pincode: &str) -> Vec<&City> {
        self.cities
            .iter()
            .filter(|c| c.pincode == pincode.trim())
            .collect()
    }
}

fn list_or_empty<T>(result: Result<Vec<T>, String>, what: &str) -> Vec<T> {
    match result {
        Ok(list) => list,
        Err(e) => {
            Logger::warn_with_component("reference-data", &format!("{} unavailable: {}", what, e));
            Vec::new()
        }
    }
}

#[hook]
pub fn use_reference_data(api_client: &ApiClient) -> UseStateHandle<ReferenceData> {
    let state = use_state(ReferenceData::default);

    use_effect_with((), {
        let state = state.clone();
        let api_client = api_client.clone();

        move |_| {
            state.set(ReferenceData {
                loading: true,
                ..ReferenceData::default()
            });

            spawn_local(async move {
                // The five lists are independent; fetch them concurrently.
                let (hobbies, cities, education_levels, professions, business_streams) = futures::join!(
                    api_client.get_hobbies(),
                    api_client.get_cities(),
                    api_client.get_education_levels(),
                    api_client.get_professions(),
                    api_client.get_business_streams(),
                );

                state.set(ReferenceData {
                    hobbies: list_or_empty(hobbies, "hobbies"),
                    cities: list_or_empty(cities, "cities"),
                    education_levels: list_or_empty(education_levels, "education levels"),
                    professions: list_or_empty(professions, "professions"),
                    business_streams: list_or_empty(business_streams, "business streams"),
                    loading: false,
                });
            });

            || ()
        }
    });

    state
}

#[cfg(test)]
mod tests {
    use super::*;

    fn city(id: i64, pincode: &str, area: &str) -> City {
        City {
            id,
            pincode: pincode.to_string(),
            name: format!("City {}", id),
            district_code: "DS01".to_string(),
            state_code: "ST01".to_string(),
            area: area.to_string(),
        }
    }

    #[test]
    fn cities_for_pincode_keeps_reference_order() {
        let data = ReferenceData {
            cities: vec![
                city(1, "302001", "North"),
                city(2, "110001", "Central"),
                city(3, "302001", "South"),
            ],
            ..ReferenceData::default()
        };

        let matches = data.cities_for_pincode("302001");
        assert_eq!(
            matches.iter().map(|c| c.id).collect::<Vec<_>>(),
            vec![1, 3]
        );
        // The form auto-populates from the first match.
        assert_eq!(matches[0].area, "North");
    }

    #[test]
    fn cities_for_pincode_trims_input_and_misses_cleanly() {
        let data = ReferenceData {
            cities: vec![city(1, "302001", "North")],
            ..ReferenceData::default()
        };

        assert_eq!(data.cities_for_pincode(" 302001 ").len(), 1);
        assert!(data.cities_for_pincode("999999").is_empty());
    }
}
