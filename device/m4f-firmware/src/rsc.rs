use m4f_common::resource_table::M4fResourceTable;

/// Read by remoteproc when it loads the firmware image.
#[used]
#[unsafe(no_mangle)]
#[unsafe(link_section = ".resource_table")]
pub static RESOURCE_TABLE: M4fResourceTable = M4fResourceTable::new();
