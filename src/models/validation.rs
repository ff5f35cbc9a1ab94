use rust_decimal::Decimal;

use super::{
    AddToCartRequest, CreateCategoryRequest, CreateProductRequest, EditCategoryRequest,
    EditProductRequest, Product, ValidationError, ValidationResult,
};

/// Trait for validating input models
pub trait Validate {
    fn validate(&self) -> ValidationResult<()>;
}

/// Validation constants
pub const MAX_PRODUCT_NAME_LENGTH: usize = 200;
pub const MAX_DESCRIPTION_LENGTH: usize = 1000;
pub const MAX_CATEGORY_NAME_LENGTH: usize = 100;
pub const MAX_IMAGE_URL_LENGTH: usize = 500;
pub const MIN_PRICE: Decimal = Decimal::from_parts(1, 0, 0, false, 2); // 0.01
pub const MAX_PRICE: Decimal = Decimal::from_parts(99999999, 0, 0, false, 2); // 999999.99
pub const MIN_CART_QUANTITY: i32 = 1;
pub const MAX_CART_QUANTITY: i32 = 1000;

impl Validate for CreateProductRequest {
    fn validate(&self) -> ValidationResult<()> {
        validate_product_name(&self.name)?;
        validate_product_description(&self.description)?;
        validate_product_price(&self.price)?;
        if let Some(discount_price) = &self.discount_price {
            validate_discount_price(discount_price, &self.price)?;
        }
        validate_image_url(&self.image_url)?;
        Ok(())
    }
}

impl Validate for EditProductRequest {
    fn validate(&self) -> ValidationResult<()> {
        validate_product_name(&self.name)?;
        validate_product_description(&self.description)?;
        validate_product_price(&self.price)?;
        validate_image_url(&self.image_url)?;
        Ok(())
    }
}

impl Validate for Product {
    fn validate(&self) -> ValidationResult<()> {
        validate_product_name(&self.name)?;
        validate_product_description(&self.description)?;
        validate_product_price(&self.price)?;
        if let Some(discount_price) = &self.discount_price {
            validate_discount_price(discount_price, &self.price)?;
        }
        validate_image_url(&self.image_url)?;
        Ok(())
    }
}

impl Validate for CreateCategoryRequest {
    fn validate(&self) -> ValidationResult<()> {
        validate_category_name(&self.name)
    }
}

impl Validate for EditCategoryRequest {
    fn validate(&self) -> ValidationResult<()> {
        validate_category_name(&self.name)
    }
}

impl Validate for AddToCartRequest {
    fn validate(&self) -> ValidationResult<()> {
        validate_cart_quantity(self.quantity)
    }
}

/// Validate product name
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "product_name".to_string(),
        });
    }

    if trimmed.len() > MAX_PRODUCT_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "product_name".to_string(),
            max_length: MAX_PRODUCT_NAME_LENGTH,
            actual_length: trimmed.len(),
        });
    }

    if trimmed
        .chars()
        .any(|c| c.is_control() && c != '\n' && c != '\r' && c != '\t')
    {
        return Err(ValidationError::InvalidValue {
            field: "product_name".to_string(),
            value: name.to_string(),
            reason: "Contains invalid control characters".to_string(),
        });
    }

    Ok(())
}

/// Validate product description
pub fn validate_product_description(description: &str) -> ValidationResult<()> {
    let trimmed = description.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "product_description".to_string(),
        });
    }

    if trimmed.len() > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::TooLong {
            field: "product_description".to_string(),
            max_length: MAX_DESCRIPTION_LENGTH,
            actual_length: trimmed.len(),
        });
    }

    Ok(())
}

/// Validate product price
pub fn validate_product_price(price: &Decimal) -> ValidationResult<()> {
    if *price < MIN_PRICE || *price > MAX_PRICE {
        return Err(ValidationError::OutOfRange {
            field: "product_price".to_string(),
            min: MIN_PRICE.to_string(),
            max: MAX_PRICE.to_string(),
            value: price.to_string(),
        });
    }

    // Prices are stored with at most 2 decimal places
    if price.scale() > 2 {
        return Err(ValidationError::InvalidValue {
            field: "product_price".to_string(),
            value: price.to_string(),
            reason: "Price cannot have more than 2 decimal places".to_string(),
        });
    }

    Ok(())
}

/// Validate a discount price against the regular price
pub fn validate_discount_price(discount_price: &Decimal, price: &Decimal) -> ValidationResult<()> {
    validate_product_price(discount_price).map_err(|_| ValidationError::OutOfRange {
        field: "discount_price".to_string(),
        min: MIN_PRICE.to_string(),
        max: MAX_PRICE.to_string(),
        value: discount_price.to_string(),
    })?;

    if discount_price >= price {
        return Err(ValidationError::InvalidValue {
            field: "discount_price".to_string(),
            value: discount_price.to_string(),
            reason: "Discount price must be lower than the regular price".to_string(),
        });
    }

    Ok(())
}

/// Validate an optional image URL
pub fn validate_image_url(image_url: &Option<String>) -> ValidationResult<()> {
    let Some(image_url) = image_url else {
        return Ok(());
    };

    let trimmed = image_url.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "image_url".to_string(),
        });
    }

    if trimmed.len() > MAX_IMAGE_URL_LENGTH {
        return Err(ValidationError::TooLong {
            field: "image_url".to_string(),
            max_length: MAX_IMAGE_URL_LENGTH,
            actual_length: trimmed.len(),
        });
    }

    if !trimmed.ends_with(".jpg")
        && !trimmed.ends_with(".jpeg")
        && !trimmed.ends_with(".png")
        && !trimmed.ends_with(".webp")
    {
        return Err(ValidationError::InvalidFormat {
            field: "image_url".to_string(),
            expected: "Valid image file extension (.jpg, .jpeg, .png, .webp)".to_string(),
        });
    }

    Ok(())
}

/// Validate category name
pub fn validate_category_name(name: &str) -> ValidationResult<()> {
    let trimmed = name.trim();

    if trimmed.is_empty() {
        return Err(ValidationError::RequiredField {
            field: "category_name".to_string(),
        });
    }

    if trimmed.len() > MAX_CATEGORY_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "category_name".to_string(),
            max_length: MAX_CATEGORY_NAME_LENGTH,
            actual_length: trimmed.len(),
        });
    }

    Ok(())
}

/// Validate cart item quantity
pub fn validate_cart_quantity(quantity: i32) -> ValidationResult<()> {
    if !(MIN_CART_QUANTITY..=MAX_CART_QUANTITY).contains(&quantity) {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: MIN_CART_QUANTITY.to_string(),
            max: MAX_CART_QUANTITY.to_string(),
            value: quantity.to_string(),
        });
    }

    Ok(())
}
