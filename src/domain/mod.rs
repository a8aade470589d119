// Domain layer: 預測流程的資料模型與介面 (ports)

pub mod model;
pub mod ports;
