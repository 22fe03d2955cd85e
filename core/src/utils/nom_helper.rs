/**
 * When parsing binary formats often we parse X bytes and convert bytes to a number
 * With nom we can do that in two steps, ex:
 *   `take X bytes`
 *   `le_uX` to number
 *
 * These functions help reduce the repetitiveness of converting bytes to a number.
 * Every integer in the shell link format is little endian
 */
use nom::{
    bytes::complete::take,
    number::complete::{le_u16, le_u32, le_u64},
};
use std::mem::size_of;

/**
 * Nom two (2) bytes to u16
 */
pub(crate) fn nom_unsigned_two_bytes(data: &[u8]) -> nom::IResult<&[u8], u16> {
    let (input, value_data) = take(size_of::<u16>())(data)?;
    let (_, value) = le_u16(value_data)?;
    Ok((input, value))
}

/**
 * Nom four (4) bytes to u32
 */
pub(crate) fn nom_unsigned_four_bytes(data: &[u8]) -> nom::IResult<&[u8], u32> {
    let (input, value_data) = take(size_of::<u32>())(data)?;
    let (_, value) = le_u32(value_data)?;
    Ok((input, value))
}

/**
 * Nom eight (8) bytes to u64
 */
pub(crate) fn nom_unsigned_eight_bytes(data: &[u8]) -> nom::IResult<&[u8], u64> {
    let (input, value_data) = take(size_of::<u64>())(data)?;
    let (_, value) = le_u64(value_data)?;
    Ok((input, value))
}

/**
 * Nom an arbitrary amount of data and return the bytes remaining and bytes nom'd
 */
pub(crate) fn nom_data(data: &[u8], count: u64) -> nom::IResult<&[u8], &[u8]> {
    let (input, value) = take(count)(data)?;

    Ok((input, value))
}
