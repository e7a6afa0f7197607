pub mod category_dto;

pub use category_dto::{
    CategoryDetailDto, CategoryResponseDto, CategorySummaryDto, CreateCategoryDto,
    GetCategoryQuery, SearchCategoryQuery, UpdateCategoryDto,
};
