use crate::auth::AuthContext;
use crate::forms::{self, FormErrors};
use crate::models::Hostel;
use crate::upload::UploadedImage;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::info;
use validator::Validate;

#[derive(Debug, Error)]
pub enum ListingError {
    #[error("Please login to post a hostel listing")]
    NotAuthenticated,
    #[error("Only hostel providers can post listings")]
    NotHostelProvider,
    #[error("{0}")]
    Invalid(FormErrors),
}

impl From<FormErrors> for ListingError {
    fn from(errors: FormErrors) -> Self {
        Self::Invalid(errors)
    }
}

/// What a hostel provider fills in to list a property
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ListingForm {
    #[validate(length(min = 3, message = "Name must be at least 3 characters"))]
    pub name: String,
    #[validate(length(min = 20, message = "Description must be at least 20 characters"))]
    pub description: String,
    #[validate(length(min = 5, message = "Address must be at least 5 characters"))]
    pub address: String,
    #[validate(length(min = 2, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 2, message = "State is required"))]
    pub state: String,
    #[validate(length(min = 6, message = "Enter a valid pincode"))]
    pub pincode: String,
    #[serde(default)]
    pub nearby_university: Option<String>,
    #[validate(length(min = 1, message = "Room type is required"))]
    pub room_types: String,
    #[validate(range(min = 500, message = "Price must be at least ₹500"))]
    pub price_per_month: u32,
    /// Comma separated
    #[validate(length(min = 3, message = "Please list some amenities"))]
    pub amenities: String,
    #[validate(length(min = 10, message = "Enter a valid contact number"))]
    pub contact_number: String,
    #[validate(email(message = "Enter a valid email"))]
    pub contact_email: String,
}

impl ListingForm {
    pub fn amenity_list(&self) -> Vec<String> {
        self.amenities
            .split(',')
            .map(str::trim)
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// An accepted listing. Nothing is stored beyond this value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListingSubmission {
    pub provider_id: String,
    pub form: ListingForm,
    pub amenities: Vec<String>,
    pub images: Vec<String>,
    pub submitted_at: DateTime<Utc>,
}

impl ListingSubmission {
    /// How the listing would look as a directory card
    pub fn preview(&self, id: u32) -> Hostel {
        Hostel {
            id,
            name: self.form.name.clone(),
            image: self.images.first().cloned().unwrap_or_default(),
            rating: 0.0,
            price: self.form.price_per_month,
            location: format!("{}, {}", self.form.city.trim(), self.form.state.trim()),
            distance: String::new(),
            amenities: self.amenities.clone(),
        }
    }
}

/// Validates and accepts a listing from the signed-in hostel provider.
///
/// A blank contact email falls back to the provider's account email.
pub async fn submit_listing(
    auth: &AuthContext,
    mut form: ListingForm,
    images: Vec<UploadedImage>,
    delay: Duration,
) -> Result<ListingSubmission, ListingError> {
    let user = auth.user().ok_or(ListingError::NotAuthenticated)?;
    if !user.is_provider() {
        return Err(ListingError::NotHostelProvider);
    }

    if form.contact_email.trim().is_empty() {
        form.contact_email = user.email.clone();
    }

    forms::check(&form)?;
    tokio::time::sleep(delay).await;

    let submission = ListingSubmission {
        provider_id: user.id.clone(),
        amenities: form.amenity_list(),
        images: images.into_iter().map(|i| i.url).collect(),
        submitted_at: Utc::now(),
        form,
    };

    info!(
        "Accepted listing '{}' in {} with {} images",
        submission.form.name,
        submission.form.city,
        submission.images.len()
    );

    Ok(submission)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{LoginForm, MemoryStorage};
    use crate::models::UserType;
    use std::sync::Arc;

    fn valid_form() -> ListingForm {
        ListingForm {
            name: "Lakeview Residency".to_string(),
            description: "Quiet rooms ten minutes from campus with meals".to_string(),
            address: "12 Lake Road".to_string(),
            city: "Chennai".to_string(),
            state: "Tamil Nadu".to_string(),
            pincode: "600036".to_string(),
            nearby_university: Some("IIT Madras".to_string()),
            room_types: "Single, Double".to_string(),
            price_per_month: 6500,
            amenities: "WiFi, Laundry, , Security".to_string(),
            contact_number: "9876543210".to_string(),
            contact_email: String::new(),
        }
    }

    async fn signed_in(user_type: UserType) -> AuthContext {
        let mut auth = AuthContext::new(Arc::new(MemoryStorage::new()), Duration::ZERO);
        auth.login(LoginForm {
            email: "owner@example.com".to_string(),
            password: "secret1".to_string(),
            user_type,
        })
        .await
        .unwrap();
        auth
    }

    #[tokio::test]
    async fn signed_out_users_cannot_post() {
        let auth = AuthContext::new(Arc::new(MemoryStorage::new()), Duration::ZERO);
        let err = submit_listing(&auth, valid_form(), vec![], Duration::ZERO)
            .await
            .unwrap_err();
        assert!(matches!(err, ListingError::NotAuthenticated));
    }

    #[tokio::test]
    async fn students_cannot_post() {
        let auth = signed_in(UserType::Student).await;
        let err = submit_listing(&auth, valid_form(), vec![], Duration::ZERO)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Only hostel providers can post listings");
    }

    #[tokio::test]
    async fn provider_listing_is_accepted() {
        let auth = signed_in(UserType::HostelProvider).await;
        let image = UploadedImage {
            url: "data:image/png;base64,AAAA".to_string(),
        };

        let submission = submit_listing(&auth, valid_form(), vec![image], Duration::ZERO)
            .await
            .unwrap();

        assert_eq!(submission.form.contact_email, "owner@example.com");
        assert_eq!(submission.amenities, vec!["WiFi", "Laundry", "Security"]);
        assert_eq!(submission.images.len(), 1);

        let card = submission.preview(11);
        assert_eq!(card.location, "Chennai, Tamil Nadu");
        assert_eq!(card.price, 6500);
    }

    #[tokio::test]
    async fn invalid_fields_are_reported() {
        let auth = signed_in(UserType::HostelProvider).await;
        let form = ListingForm {
            price_per_month: 200,
            pincode: "123".to_string(),
            ..valid_form()
        };

        match submit_listing(&auth, form, vec![], Duration::ZERO).await {
            Err(ListingError::Invalid(errors)) => {
                assert_eq!(
                    errors.field("price_per_month"),
                    ["Price must be at least ₹500".to_string()]
                );
                assert_eq!(errors.field("pincode"), ["Enter a valid pincode".to_string()]);
            }
            other => panic!("unexpected result {:?}", other),
        }
    }
}
