mod electrical_meter;
mod energy_producer;
mod factory;
mod invoice;
mod meter_reading;

pub use electrical_meter::{ElectricalMeter, NewElectricalMeter};
pub use energy_producer::{EnergyProducer, NewEnergyProducer};
pub use factory::{Factory, NewFactory};
pub use invoice::{Invoice, NewInvoice};
pub use meter_reading::{MeterReading, NewMeterReading};
