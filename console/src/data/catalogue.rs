//! Reads and writes of the reference data: categories, departments,
//! manufacturers, models, and suppliers.
//!
//! Categories are read page by page; the other resources are read as plain
//! lists, with paginated variants available.

use super::DataContext;
use crate::domain::{
    Category, CategoryCreateInput, CategoryPatch, Department, DepartmentCreateInput,
    DepartmentPatch, Manufacturer, ManufacturerCreateInput, ManufacturerPatch, Model,
    ModelCreateInput, ModelPatch, QueryOptions, RecordId, RecordPatch, Supplier,
    SupplierCreateInput, SupplierPatch,
};
use crate::query::{DetailQuery, ListQuery, Mutation, PagedQuery};

impl DataContext {
    /// Paginated category read.
    pub fn categories_query(&self, options: QueryOptions) -> PagedQuery<Category> {
        self.page_query(self.categories.crud(), options)
    }

    /// Single category read.
    pub fn category_query(&self, id: impl Into<RecordId>) -> DetailQuery<Category> {
        self.detail_query(self.categories.crud(), id.into())
    }

    /// Create a category.
    pub fn create_category_mutation(&self) -> Mutation<CategoryCreateInput, Category> {
        self.create_mutation(self.categories.crud())
    }

    /// Update a category.
    pub fn update_category_mutation(&self) -> Mutation<RecordPatch<CategoryPatch>, Category> {
        self.update_mutation(self.categories.crud())
    }

    /// Delete a category.
    pub fn delete_category_mutation(&self) -> Mutation<RecordId, ()> {
        self.delete_mutation(self.categories.crud())
    }

    /// Department list read.
    pub fn departments_query(&self, options: QueryOptions) -> ListQuery<Department> {
        self.list_query(self.departments.crud(), options)
    }

    /// Paginated department read.
    pub fn departments_page_query(&self, options: QueryOptions) -> PagedQuery<Department> {
        self.page_query(self.departments.crud(), options)
    }

    /// Single department read.
    pub fn department_query(&self, id: impl Into<RecordId>) -> DetailQuery<Department> {
        self.detail_query(self.departments.crud(), id.into())
    }

    /// Create a department.
    pub fn create_department_mutation(&self) -> Mutation<DepartmentCreateInput, Department> {
        self.create_mutation(self.departments.crud())
    }

    /// Update a department.
    pub fn update_department_mutation(
        &self,
    ) -> Mutation<RecordPatch<DepartmentPatch>, Department> {
        self.update_mutation(self.departments.crud())
    }

    /// Delete a department.
    pub fn delete_department_mutation(&self) -> Mutation<RecordId, ()> {
        self.delete_mutation(self.departments.crud())
    }

    /// Manufacturer list read.
    pub fn manufacturers_query(&self, options: QueryOptions) -> ListQuery<Manufacturer> {
        self.list_query(self.manufacturers.crud(), options)
    }

    /// Paginated manufacturer read.
    pub fn manufacturers_page_query(&self, options: QueryOptions) -> PagedQuery<Manufacturer> {
        self.page_query(self.manufacturers.crud(), options)
    }

    /// Single manufacturer read.
    pub fn manufacturer_query(&self, id: impl Into<RecordId>) -> DetailQuery<Manufacturer> {
        self.detail_query(self.manufacturers.crud(), id.into())
    }

    /// Create a manufacturer.
    pub fn create_manufacturer_mutation(
        &self,
    ) -> Mutation<ManufacturerCreateInput, Manufacturer> {
        self.create_mutation(self.manufacturers.crud())
    }

    /// Update a manufacturer.
    pub fn update_manufacturer_mutation(
        &self,
    ) -> Mutation<RecordPatch<ManufacturerPatch>, Manufacturer> {
        self.update_mutation(self.manufacturers.crud())
    }

    /// Delete a manufacturer.
    pub fn delete_manufacturer_mutation(&self) -> Mutation<RecordId, ()> {
        self.delete_mutation(self.manufacturers.crud())
    }

    /// Model list read.
    pub fn models_query(&self, options: QueryOptions) -> ListQuery<Model> {
        self.list_query(self.models.crud(), options)
    }

    /// Paginated model read.
    pub fn models_page_query(&self, options: QueryOptions) -> PagedQuery<Model> {
        self.page_query(self.models.crud(), options)
    }

    /// Single model read.
    pub fn model_query(&self, id: impl Into<RecordId>) -> DetailQuery<Model> {
        self.detail_query(self.models.crud(), id.into())
    }

    /// Create a model.
    pub fn create_model_mutation(&self) -> Mutation<ModelCreateInput, Model> {
        self.create_mutation(self.models.crud())
    }

    /// Update a model.
    pub fn update_model_mutation(&self) -> Mutation<RecordPatch<ModelPatch>, Model> {
        self.update_mutation(self.models.crud())
    }

    /// Delete a model.
    pub fn delete_model_mutation(&self) -> Mutation<RecordId, ()> {
        self.delete_mutation(self.models.crud())
    }

    /// Supplier list read.
    pub fn suppliers_query(&self, options: QueryOptions) -> ListQuery<Supplier> {
        self.list_query(self.suppliers.crud(), options)
    }

    /// Paginated supplier read.
    pub fn suppliers_page_query(&self, options: QueryOptions) -> PagedQuery<Supplier> {
        self.page_query(self.suppliers.crud(), options)
    }

    /// Single supplier read.
    pub fn supplier_query(&self, id: impl Into<RecordId>) -> DetailQuery<Supplier> {
        self.detail_query(self.suppliers.crud(), id.into())
    }

    /// Create a supplier.
    pub fn create_supplier_mutation(&self) -> Mutation<SupplierCreateInput, Supplier> {
        self.create_mutation(self.suppliers.crud())
    }

    /// Update a supplier.
    pub fn update_supplier_mutation(&self) -> Mutation<RecordPatch<SupplierPatch>, Supplier> {
        self.update_mutation(self.suppliers.crud())
    }

    /// Delete a supplier.
    pub fn delete_supplier_mutation(&self) -> Mutation<RecordId, ()> {
        self.delete_mutation(self.suppliers.crud())
    }
}
