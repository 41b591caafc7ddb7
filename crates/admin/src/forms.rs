//! Client-side validation of create/update payloads.
//!
//! These checks give the operator an immediate message before a request is
//! sent. The backend remains the authority on every invariant; a form that
//! passes here can still be rejected with `ApiError::Api`.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use storedash_core::{
    CategoryId, DiscountType, Email, NotificationKind, ProductId, RegisterRequest, StoreId,
};
use url::Url;

use crate::error::ValidationError;

/// Maximum length of a review comment.
pub const MAX_COMMENT_LENGTH: usize = 2000;
/// Minimum length of a new account password.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// A payload that can be checked before it is sent.
pub trait Validate {
    /// Check the payload.
    ///
    /// # Errors
    ///
    /// Returns the first [`ValidationError`] found.
    fn validate(&self) -> Result<(), ValidationError>;
}

fn require(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        Err(ValidationError::Required { field })
    } else {
        Ok(())
    }
}

fn non_negative(field: &'static str, value: Decimal) -> Result<(), ValidationError> {
    if value.is_sign_negative() && !value.is_zero() {
        Err(ValidationError::Negative { field })
    } else {
        Ok(())
    }
}

fn web_url(field: &'static str, value: &str) -> Result<(), ValidationError> {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(()),
        _ => Err(ValidationError::Invalid {
            field,
            message: format!("'{value}' is not an http(s) URL"),
        }),
    }
}

/// Create/update body for a product.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductForm {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub store_id: Option<StoreId>,
    pub image_urls: Vec<String>,
    pub active: bool,
}

impl Validate for ProductForm {
    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        non_negative("price", self.price)?;
        if self.stock < 0 {
            return Err(ValidationError::Negative { field: "stock" });
        }
        self.image_urls
            .iter()
            .try_for_each(|url| web_url("imageUrls", url))
    }
}

/// Create/update body for a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreForm {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub active: bool,
}

impl Validate for StoreForm {
    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)?;
        match self.logo_url.as_deref() {
            Some(url) => web_url("logoUrl", url),
            None => Ok(()),
        }
    }
}

/// Create/update body for a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryForm {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<CategoryId>,
}

impl Validate for CategoryForm {
    fn validate(&self) -> Result<(), ValidationError> {
        require("name", &self.name)
    }
}

/// Create/update body for a discount code.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountForm {
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub discount_type: DiscountType,
    pub value: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starts_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ends_at: Option<DateTime<Utc>>,
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_limit: Option<u32>,
}

impl Validate for DiscountForm {
    fn validate(&self) -> Result<(), ValidationError> {
        require("code", &self.code)?;
        if self.code.trim().chars().any(char::is_whitespace) {
            return Err(ValidationError::Invalid {
                field: "code",
                message: "cannot contain spaces".to_string(),
            });
        }

        match self.discount_type {
            DiscountType::Percentage => {
                if self.value < Decimal::ZERO || self.value > Decimal::ONE_HUNDRED {
                    return Err(ValidationError::OutOfRange {
                        field: "value",
                        min: "0".to_string(),
                        max: "100".to_string(),
                    });
                }
            }
            DiscountType::FixedAmount => {
                if self.value <= Decimal::ZERO {
                    return Err(ValidationError::Invalid {
                        field: "value",
                        message: "must be greater than zero".to_string(),
                    });
                }
            }
            DiscountType::Unknown => {
                return Err(ValidationError::Invalid {
                    field: "discountType",
                    message: "unsupported discount type".to_string(),
                });
            }
        }

        if let (Some(starts), Some(ends)) = (self.starts_at, self.ends_at)
            && starts > ends
        {
            return Err(ValidationError::Invalid {
                field: "endsAt",
                message: "must not be before startsAt".to_string(),
            });
        }

        if self.usage_limit == Some(0) {
            return Err(ValidationError::Invalid {
                field: "usageLimit",
                message: "must be at least 1 when set".to_string(),
            });
        }

        Ok(())
    }
}

/// Create/update body for a review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewForm {
    pub product_id: ProductId,
    pub rating: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Validate for ReviewForm {
    fn validate(&self) -> Result<(), ValidationError> {
        if !(1..=5).contains(&self.rating) {
            return Err(ValidationError::OutOfRange {
                field: "rating",
                min: "1".to_string(),
                max: "5".to_string(),
            });
        }
        if self
            .comment
            .as_ref()
            .is_some_and(|comment| comment.chars().count() > MAX_COMMENT_LENGTH)
        {
            return Err(ValidationError::Invalid {
                field: "comment",
                message: format!("must be at most {MAX_COMMENT_LENGTH} characters"),
            });
        }
        Ok(())
    }
}

/// Body of a notification broadcast to all users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BroadcastForm {
    pub title: String,
    pub message: String,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
}

impl Validate for BroadcastForm {
    fn validate(&self) -> Result<(), ValidationError> {
        require("title", &self.title)?;
        require("message", &self.message)
    }
}

/// Sign-up form for a new account.
#[derive(Clone, PartialEq, Eq)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

impl std::fmt::Debug for RegisterForm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterForm")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .finish()
    }
}

impl Validate for RegisterForm {
    fn validate(&self) -> Result<(), ValidationError> {
        Email::parse(&self.email).map_err(|e| ValidationError::Invalid {
            field: "email",
            message: e.to_string(),
        })?;
        if self.password.chars().count() < MIN_PASSWORD_LENGTH {
            return Err(ValidationError::Invalid {
                field: "password",
                message: format!("must be at least {MIN_PASSWORD_LENGTH} characters"),
            });
        }
        require("firstName", &self.first_name)?;
        require("lastName", &self.last_name)
    }
}

impl From<RegisterForm> for RegisterRequest {
    fn from(form: RegisterForm) -> Self {
        Self {
            email: form.email.trim().to_string(),
            password: form.password,
            first_name: form.first_name.trim().to_string(),
            last_name: form.last_name.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;

    fn product() -> ProductForm {
        ProductForm {
            name: "Green tea".to_string(),
            description: None,
            price: Decimal::new(450, 2),
            stock: 10,
            category_id: None,
            store_id: Some(StoreId::new(1)),
            image_urls: vec!["https://cdn.example/tea.png".to_string()],
            active: true,
        }
    }

    fn discount() -> DiscountForm {
        DiscountForm {
            code: "SPRING10".to_string(),
            description: None,
            discount_type: DiscountType::Percentage,
            value: Decimal::TEN,
            starts_at: None,
            ends_at: None,
            active: true,
            usage_limit: None,
        }
    }

    #[test]
    fn test_product_form_valid() {
        assert_eq!(product().validate(), Ok(()));
    }

    #[test]
    fn test_product_form_rejections() {
        let mut form = product();
        form.name = "  ".to_string();
        assert_eq!(form.validate(), Err(ValidationError::Required { field: "name" }));

        let mut form = product();
        form.price = Decimal::new(-1, 2);
        assert_eq!(form.validate(), Err(ValidationError::Negative { field: "price" }));

        let mut form = product();
        form.stock = -1;
        assert_eq!(form.validate(), Err(ValidationError::Negative { field: "stock" }));

        let mut form = product();
        form.image_urls.push("file:///etc/passwd".to_string());
        assert!(matches!(
            form.validate(),
            Err(ValidationError::Invalid { field: "imageUrls", .. })
        ));
    }

    #[test]
    fn test_product_form_serializes_camel_case() {
        let json = serde_json::to_value(product()).unwrap_or_default();
        assert_eq!(json["storeId"], 1);
        assert!(json.get("categoryId").is_none());
        assert_eq!(json["imageUrls"][0], "https://cdn.example/tea.png");
    }

    #[test]
    fn test_discount_percentage_range() {
        assert_eq!(discount().validate(), Ok(()));

        let mut form = discount();
        form.value = Decimal::new(101, 0);
        assert!(matches!(
            form.validate(),
            Err(ValidationError::OutOfRange { field: "value", .. })
        ));
    }

    #[test]
    fn test_discount_fixed_amount_must_be_positive() {
        let mut form = discount();
        form.discount_type = DiscountType::FixedAmount;
        form.value = Decimal::ZERO;
        assert!(matches!(
            form.validate(),
            Err(ValidationError::Invalid { field: "value", .. })
        ));

        form.value = Decimal::new(500, 2);
        assert_eq!(form.validate(), Ok(()));
    }

    #[test]
    fn test_discount_dates_and_code() {
        let now = Utc::now();
        let mut form = discount();
        form.starts_at = Some(now);
        form.ends_at = Some(now - Duration::days(1));
        assert!(matches!(
            form.validate(),
            Err(ValidationError::Invalid { field: "endsAt", .. })
        ));

        let mut form = discount();
        form.code = "SPRING 10".to_string();
        assert!(matches!(
            form.validate(),
            Err(ValidationError::Invalid { field: "code", .. })
        ));

        let mut form = discount();
        form.usage_limit = Some(0);
        assert!(form.validate().is_err());
    }

    #[test]
    fn test_review_rating_range() {
        let mut form = ReviewForm {
            product_id: ProductId::new(1),
            rating: 5,
            comment: Some("Lovely".to_string()),
        };
        assert_eq!(form.validate(), Ok(()));

        form.rating = 0;
        assert!(form.validate().is_err());
        form.rating = 6;
        assert!(form.validate().is_err());

        form.rating = 3;
        form.comment = Some("x".repeat(MAX_COMMENT_LENGTH + 1));
        assert!(matches!(
            form.validate(),
            Err(ValidationError::Invalid { field: "comment", .. })
        ));
    }

    #[test]
    fn test_broadcast_requires_title_and_message() {
        let mut form = BroadcastForm {
            title: "Maintenance".to_string(),
            message: String::new(),
            kind: NotificationKind::System,
        };
        assert_eq!(form.validate(), Err(ValidationError::Required { field: "message" }));

        form.message = "Back at 10:00".to_string();
        assert_eq!(form.validate(), Ok(()));
        let json = serde_json::to_value(&form).unwrap_or_default();
        assert_eq!(json["type"], "SYSTEM");
    }

    #[test]
    fn test_register_form() {
        let mut form = RegisterForm {
            email: "new@shop.example".to_string(),
            password: "long-enough".to_string(),
            first_name: "Ana".to_string(),
            last_name: "Lima".to_string(),
        };
        assert_eq!(form.validate(), Ok(()));
        assert!(!format!("{form:?}").contains("long-enough"));

        form.password = "short".to_string();
        assert!(matches!(
            form.validate(),
            Err(ValidationError::Invalid { field: "password", .. })
        ));

        form.password = "long-enough".to_string();
        form.email = "not-an-email".to_string();
        assert!(matches!(
            form.validate(),
            Err(ValidationError::Invalid { field: "email", .. })
        ));
    }

    #[test]
    fn test_store_and_category_forms() {
        let store = StoreForm {
            name: "Tea House".to_string(),
            description: None,
            logo_url: Some("not a url".to_string()),
            active: true,
        };
        assert!(store.validate().is_err());

        let category = CategoryForm {
            name: String::new(),
            description: None,
            parent_id: None,
        };
        assert_eq!(category.validate(), Err(ValidationError::Required { field: "name" }));
    }
}
