//! IANA information element registry.
//!
//! Maps `(enterprise id, field id)` to the abstract data type of the information element. The
//! walker never consults the registry; it exists for handlers that want to validate or label
//! the values they receive.
//!
//! ```
//! use ipfix_walk::registry::{self, DataType};
//!
//! let element = registry::lookup(0, 8).unwrap();
//! assert_eq!(element.name, "sourceIPv4Address");
//! assert_eq!(element.data_type, DataType::Ipv4Address);
//! assert_eq!(element.data_type.min_length(), 4);
//! assert!(registry::lookup(29305, 8).is_none());
//! ```

/// Abstract data type of an information element (RFC 7012 section 3.1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType
{
    /// `octetArray`
    OctetArray,
    /// `unsigned8`
    Unsigned8,
    /// `unsigned16`
    Unsigned16,
    /// `unsigned32`
    Unsigned32,
    /// `unsigned64`
    Unsigned64,
    /// `signed8`
    Signed8,
    /// `signed16`
    Signed16,
    /// `signed32`
    Signed32,
    /// `signed64`
    Signed64,
    /// `float32`
    Float32,
    /// `float64`
    Float64,
    /// `boolean`
    Boolean,
    /// `macAddress`
    MacAddress,
    /// `string`
    String,
    /// `dateTimeSeconds`
    DateTimeSeconds,
    /// `dateTimeMilliseconds`
    DateTimeMilliseconds,
    /// `dateTimeMicroseconds`
    DateTimeMicroseconds,
    /// `dateTimeNanoseconds`
    DateTimeNanoseconds,
    /// `ipv4Address`
    Ipv4Address,
    /// `ipv6Address`
    Ipv6Address,
    /// `basicList`
    BasicList,
    /// `subTemplateList`
    SubTemplateList,
    /// `subTemplateMultiList`
    SubTemplateMultiList,
}

impl DataType
{
    /// Smallest encoded length of a value.
    ///
    /// Integer types may use reduced-size encoding (RFC 7011 section 6.2), so a single byte is
    /// enough for any of them.
    pub fn min_length(&self) -> usize
    {
        match self {
            Self::Unsigned8
            | Self::Unsigned16
            | Self::Unsigned32
            | Self::Unsigned64
            | Self::Signed8
            | Self::Signed16
            | Self::Signed32
            | Self::Signed64
            | Self::Boolean => 1,
            Self::Float32 | Self::Float64 => 4,
            Self::MacAddress => 6,
            Self::DateTimeSeconds | Self::Ipv4Address => 4,
            Self::DateTimeMilliseconds
            | Self::DateTimeMicroseconds
            | Self::DateTimeNanoseconds => 8,
            Self::Ipv6Address => 16,
            Self::OctetArray
            | Self::String
            | Self::BasicList
            | Self::SubTemplateList
            | Self::SubTemplateMultiList => 0,
        }
    }

    /// Largest encoded length of a value, if bounded.
    pub fn max_length(&self) -> Option<usize>
    {
        match self {
            Self::Unsigned8 | Self::Signed8 | Self::Boolean => Some(1),
            Self::Unsigned16 | Self::Signed16 => Some(2),
            Self::Unsigned32 | Self::Signed32 | Self::Float32 => Some(4),
            Self::Unsigned64 | Self::Signed64 | Self::Float64 => Some(8),
            Self::MacAddress => Some(6),
            Self::DateTimeSeconds | Self::Ipv4Address => Some(4),
            Self::DateTimeMilliseconds
            | Self::DateTimeMicroseconds
            | Self::DateTimeNanoseconds => Some(8),
            Self::Ipv6Address => Some(16),
            Self::OctetArray
            | Self::String
            | Self::BasicList
            | Self::SubTemplateList
            | Self::SubTemplateMultiList => None,
        }
    }
}

/// Registered information element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InformationElement
{
    /// Element ID.
    pub id: u16,

    /// Element name.
    pub name: &'static str,

    /// Abstract data type.
    pub data_type: DataType,
}

impl InformationElement
{
    /// True, if a value of `length` bytes is a valid encoding of the element.
    pub fn accepts_length(&self, length: usize) -> bool
    {
        length >= self.data_type.min_length()
            && self.data_type.max_length().map_or(true, |max| length <= max)
    }
}

/// Looks up an information element.
///
/// Only IANA elements (enterprise 0) are registered.
pub fn lookup(enterprise_id: u32, field_id: u16) -> Option<&'static InformationElement>
{
    if enterprise_id != 0 {
        return None;
    }

    IANA_ELEMENTS
        .binary_search_by_key(&field_id, |ie| ie.id)
        .ok()
        .map(|idx| &IANA_ELEMENTS[idx])
}

/// Iterates every registered IANA element in ID order.
pub fn iana_elements() -> impl Iterator<Item = &'static InformationElement>
{
    IANA_ELEMENTS.iter()
}

macro_rules! elements {
    ($($id:literal $name:ident $data_type:ident,)*) => {
        &[$(InformationElement {
            id: $id,
            name: stringify!($name),
            data_type: DataType::$data_type,
        },)*]
    };
}

// Sorted by ID for the binary search in `lookup`.
static IANA_ELEMENTS: &[InformationElement] = elements! {
    1 octetDeltaCount Unsigned64,
    2 packetDeltaCount Unsigned64,
    3 deltaFlowCount Unsigned64,
    4 protocolIdentifier Unsigned8,
    5 ipClassOfService Unsigned8,
    6 tcpControlBits Unsigned16,
    7 sourceTransportPort Unsigned16,
    8 sourceIPv4Address Ipv4Address,
    9 sourceIPv4PrefixLength Unsigned8,
    10 ingressInterface Unsigned32,
    11 destinationTransportPort Unsigned16,
    12 destinationIPv4Address Ipv4Address,
    13 destinationIPv4PrefixLength Unsigned8,
    14 egressInterface Unsigned32,
    15 ipNextHopIPv4Address Ipv4Address,
    16 bgpSourceAsNumber Unsigned32,
    17 bgpDestinationAsNumber Unsigned32,
    18 bgpNextHopIPv4Address Ipv4Address,
    19 postMCastPacketDeltaCount Unsigned64,
    20 postMCastOctetDeltaCount Unsigned64,
    21 flowEndSysUpTime Unsigned32,
    22 flowStartSysUpTime Unsigned32,
    23 postOctetDeltaCount Unsigned64,
    24 postPacketDeltaCount Unsigned64,
    25 minimumIpTotalLength Unsigned64,
    26 maximumIpTotalLength Unsigned64,
    27 sourceIPv6Address Ipv6Address,
    28 destinationIPv6Address Ipv6Address,
    29 sourceIPv6PrefixLength Unsigned8,
    30 destinationIPv6PrefixLength Unsigned8,
    31 flowLabelIPv6 Unsigned32,
    32 icmpTypeCodeIPv4 Unsigned16,
    33 igmpType Unsigned8,
    34 samplingInterval Unsigned32,
    35 samplingAlgorithm Unsigned8,
    36 flowActiveTimeout Unsigned16,
    37 flowInactiveTimeout Unsigned16,
    38 engineType Unsigned8,
    39 engineId Unsigned8,
    40 exportedOctetTotalCount Unsigned64,
    41 exportedMessageTotalCount Unsigned64,
    42 exportedFlowRecordTotalCount Unsigned64,
    43 ipv4RouterSc Ipv4Address,
    44 sourceIPv4Prefix Ipv4Address,
    45 destinationIPv4Prefix Ipv4Address,
    46 mplsTopLabelType Unsigned8,
    47 mplsTopLabelIPv4Address Ipv4Address,
    48 samplerId Unsigned8,
    49 samplerMode Unsigned8,
    50 samplerRandomInterval Unsigned32,
    51 classId Unsigned8,
    52 minimumTTL Unsigned8,
    53 maximumTTL Unsigned8,
    54 fragmentIdentification Unsigned32,
    55 postIpClassOfService Unsigned8,
    56 sourceMacAddress MacAddress,
    57 postDestinationMacAddress MacAddress,
    58 vlanId Unsigned16,
    59 postVlanId Unsigned16,
    60 ipVersion Unsigned8,
    61 flowDirection Unsigned8,
    62 ipNextHopIPv6Address Ipv6Address,
    63 bgpNextHopIPv6Address Ipv6Address,
    64 ipv6ExtensionHeaders Unsigned32,
    70 mplsTopLabelStackSection OctetArray,
    71 mplsLabelStackSection2 OctetArray,
    72 mplsLabelStackSection3 OctetArray,
    73 mplsLabelStackSection4 OctetArray,
    74 mplsLabelStackSection5 OctetArray,
    75 mplsLabelStackSection6 OctetArray,
    76 mplsLabelStackSection7 OctetArray,
    77 mplsLabelStackSection8 OctetArray,
    78 mplsLabelStackSection9 OctetArray,
    79 mplsLabelStackSection10 OctetArray,
    80 destinationMacAddress MacAddress,
    81 postSourceMacAddress MacAddress,
    82 interfaceName String,
    83 interfaceDescription String,
    84 samplerName String,
    85 octetTotalCount Unsigned64,
    86 packetTotalCount Unsigned64,
    87 flagsAndSamplerId Unsigned32,
    88 fragmentOffset Unsigned16,
    89 forwardingStatus Unsigned8,
    90 mplsVpnRouteDistinguisher OctetArray,
    91 mplsTopLabelPrefixLength Unsigned8,
    92 srcTrafficIndex Unsigned32,
    93 dstTrafficIndex Unsigned32,
    94 applicationDescription String,
    95 applicationId OctetArray,
    96 applicationName String,
    98 postIpDiffServCodePoint Unsigned8,
    99 multicastReplicationFactor Unsigned32,
    100 className String,
    101 classificationEngineId Unsigned8,
    102 layer2packetSectionOffset Unsigned16,
    103 layer2packetSectionSize Unsigned16,
    104 layer2packetSectionData OctetArray,
    128 bgpNextAdjacentAsNumber Unsigned32,
    129 bgpPrevAdjacentAsNumber Unsigned32,
    130 exporterIPv4Address Ipv4Address,
    131 exporterIPv6Address Ipv6Address,
    132 droppedOctetDeltaCount Unsigned64,
    133 droppedPacketDeltaCount Unsigned64,
    134 droppedOctetTotalCount Unsigned64,
    135 droppedPacketTotalCount Unsigned64,
    136 flowEndReason Unsigned8,
    137 commonPropertiesId Unsigned64,
    138 observationPointId Unsigned64,
    139 icmpTypeCodeIPv6 Unsigned16,
    140 mplsTopLabelIPv6Address Ipv6Address,
    141 lineCardId Unsigned32,
    142 portId Unsigned32,
    143 meteringProcessId Unsigned32,
    144 exportingProcessId Unsigned32,
    145 templateId Unsigned16,
    146 wlanChannelId Unsigned8,
    147 wlanSSID String,
    148 flowId Unsigned64,
    149 observationDomainId Unsigned32,
    150 flowStartSeconds DateTimeSeconds,
    151 flowEndSeconds DateTimeSeconds,
    152 flowStartMilliseconds DateTimeMilliseconds,
    153 flowEndMilliseconds DateTimeMilliseconds,
    154 flowStartMicroseconds DateTimeMicroseconds,
    155 flowEndMicroseconds DateTimeMicroseconds,
    156 flowStartNanoseconds DateTimeNanoseconds,
    157 flowEndNanoseconds DateTimeNanoseconds,
    158 flowStartDeltaMicroseconds Unsigned32,
    159 flowEndDeltaMicroseconds Unsigned32,
    160 systemInitTimeMilliseconds DateTimeMilliseconds,
    161 flowDurationMilliseconds Unsigned32,
    162 flowDurationMicroseconds Unsigned32,
    163 observedFlowTotalCount Unsigned64,
    164 ignoredPacketTotalCount Unsigned64,
    165 ignoredOctetTotalCount Unsigned64,
    166 notSentFlowTotalCount Unsigned64,
    167 notSentPacketTotalCount Unsigned64,
    168 notSentOctetTotalCount Unsigned64,
    169 destinationIPv6Prefix Ipv6Address,
    170 sourceIPv6Prefix Ipv6Address,
    171 postOctetTotalCount Unsigned64,
    172 postPacketTotalCount Unsigned64,
    173 flowKeyIndicator Unsigned64,
    174 postMCastPacketTotalCount Unsigned64,
    175 postMCastOctetTotalCount Unsigned64,
    176 icmpTypeIPv4 Unsigned8,
    177 icmpCodeIPv4 Unsigned8,
    178 icmpTypeIPv6 Unsigned8,
    179 icmpCodeIPv6 Unsigned8,
    180 udpSourcePort Unsigned16,
    181 udpDestinationPort Unsigned16,
    182 tcpSourcePort Unsigned16,
    183 tcpDestinationPort Unsigned16,
    184 tcpSequenceNumber Unsigned32,
    185 tcpAcknowledgementNumber Unsigned32,
    186 tcpWindowSize Unsigned16,
    187 tcpUrgentPointer Unsigned16,
    188 tcpHeaderLength Unsigned8,
    189 ipHeaderLength Unsigned8,
    190 totalLengthIPv4 Unsigned16,
    191 payloadLengthIPv6 Unsigned16,
    192 ipTTL Unsigned8,
    193 nextHeaderIPv6 Unsigned8,
    194 mplsPayloadLength Unsigned32,
    195 ipDiffServCodePoint Unsigned8,
    196 ipPrecedence Unsigned8,
    197 fragmentFlags Unsigned8,
    198 octetDeltaSumOfSquares Unsigned64,
    199 octetTotalSumOfSquares Unsigned64,
    200 mplsTopLabelTTL Unsigned8,
    201 mplsLabelStackLength Unsigned32,
    202 mplsLabelStackDepth Unsigned32,
    203 mplsTopLabelExp Unsigned8,
    204 ipPayloadLength Unsigned32,
    205 udpMessageLength Unsigned16,
    206 isMulticast Unsigned8,
    207 ipv4IHL Unsigned8,
    208 ipv4Options Unsigned32,
    209 tcpOptions Unsigned64,
    210 paddingOctets OctetArray,
    211 collectorIPv4Address Ipv4Address,
    212 collectorIPv6Address Ipv6Address,
    213 exportInterface Unsigned32,
    214 exportProtocolVersion Unsigned8,
    215 exportTransportProtocol Unsigned8,
    216 collectorTransportPort Unsigned16,
    217 exporterTransportPort Unsigned16,
    218 tcpSynTotalCount Unsigned64,
    219 tcpFinTotalCount Unsigned64,
    220 tcpRstTotalCount Unsigned64,
    221 tcpPshTotalCount Unsigned64,
    222 tcpAckTotalCount Unsigned64,
    223 tcpUrgTotalCount Unsigned64,
    224 ipTotalLength Unsigned64,
    225 postNATSourceIPv4Address Ipv4Address,
    226 postNATDestinationIPv4Address Ipv4Address,
    227 postNAPTSourceTransportPort Unsigned16,
    228 postNAPTDestinationTransportPort Unsigned16,
    229 natOriginatingAddressRealm Unsigned8,
    230 natEvent Unsigned8,
    231 initiatorOctets Unsigned64,
    232 responderOctets Unsigned64,
    233 firewallEvent Unsigned8,
    234 ingressVRFID Unsigned32,
    235 egressVRFID Unsigned32,
    236 VRFname String,
    237 postMplsTopLabelExp Unsigned8,
    238 tcpWindowScale Unsigned16,
    239 biflowDirection Unsigned8,
    240 ethernetHeaderLength Unsigned8,
    241 ethernetPayloadLength Unsigned16,
    242 ethernetTotalLength Unsigned16,
    243 dot1qVlanId Unsigned16,
    244 dot1qPriority Unsigned8,
    245 dot1qCustomerVlanId Unsigned16,
    246 dot1qCustomerPriority Unsigned8,
    251 postDot1qVlanId Unsigned16,
    252 ingressPhysicalInterface Unsigned32,
    253 egressPhysicalInterface Unsigned32,
    256 ethernetType Unsigned16,
    276 dataRecordsReliability Boolean,
    291 basicList BasicList,
    292 subTemplateList SubTemplateList,
    293 subTemplateMultiList SubTemplateMultiList,
};
