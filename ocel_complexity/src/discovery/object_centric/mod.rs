/// Discovery of object-wise directly-follows graphs from sub-relations
pub mod ocdfg;
