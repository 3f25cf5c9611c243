//! Clients for the reference data assets point at: categories,
//! departments, manufacturers, models, and suppliers.

use super::resource_client;
use crate::domain::{
    Category, CategoryCreateInput, CategoryPatch, Department, DepartmentCreateInput,
    DepartmentPatch, Endpoint, Manufacturer, ManufacturerCreateInput, ManufacturerPatch, Model,
    ModelCreateInput, ModelPatch, Supplier, SupplierCreateInput, SupplierPatch,
};

resource_client! {
    /// Client for asset categories.
    pub struct CategoryClient for CategoryResource {
        endpoint: Endpoint::Categories,
        record: Category,
        create: CategoryCreateInput,
        patch: CategoryPatch,
    }
}

resource_client! {
    /// Client for departments.
    pub struct DepartmentClient for DepartmentResource {
        endpoint: Endpoint::Departments,
        record: Department,
        create: DepartmentCreateInput,
        patch: DepartmentPatch,
    }
}

resource_client! {
    /// Client for manufacturers.
    pub struct ManufacturerClient for ManufacturerResource {
        endpoint: Endpoint::Manufacturers,
        record: Manufacturer,
        create: ManufacturerCreateInput,
        patch: ManufacturerPatch,
    }
}

resource_client! {
    /// Client for asset models.
    pub struct ModelClient for ModelResource {
        endpoint: Endpoint::Models,
        record: Model,
        create: ModelCreateInput,
        patch: ModelPatch,
    }
}

resource_client! {
    /// Client for suppliers.
    pub struct SupplierClient for SupplierResource {
        endpoint: Endpoint::Suppliers,
        record: Supplier,
        create: SupplierCreateInput,
        patch: SupplierPatch,
    }
}
